use std::path::Path;

use dither_core::{DitherAlgorithm, PaletteMode, Parameters, Rgb, DEFAULT_SEED};
use serde::Deserialize;

use crate::error::ConfigError;

/// Dithering preset loaded from a YAML file
///
/// Field names follow [`Parameters`]. Algorithm and palette are given as
/// names (slug or display name); unknown names fall back with a warning.
///
/// ```yaml
/// algorithm: atkinson
/// palette: custom
/// colors: ["#000", "#ff8800", "#fff"]
/// strength: 0.8
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Algorithm name
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Palette mode name
    #[serde(default = "default_palette")]
    pub palette: String,

    /// Custom palette as hex strings; switches the palette to custom
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    #[serde(default = "default_one")]
    pub strength: f32,

    #[serde(default = "default_true")]
    pub serpentine: bool,

    #[serde(default = "default_one")]
    pub gamma: f32,

    #[serde(default = "default_one")]
    pub contrast: f32,

    #[serde(default)]
    pub brightness: f32,

    #[serde(default = "default_one")]
    pub saturation: f32,

    #[serde(default = "default_bayer_size")]
    pub bayer_size: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_pattern_scale")]
    pub pattern_scale: u32,
}

fn default_algorithm() -> String {
    DitherAlgorithm::default().slug().to_string()
}

fn default_palette() -> String {
    PaletteMode::default().slug().to_string()
}

fn default_one() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_bayer_size() -> usize {
    8
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_pattern_scale() -> u32 {
    2
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            palette: default_palette(),
            colors: None,
            strength: 1.0,
            serpentine: true,
            gamma: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            saturation: 1.0,
            bayer_size: default_bayer_size(),
            seed: DEFAULT_SEED,
            pattern_scale: default_pattern_scale(),
        }
    }
}

impl Preset {
    /// Parse a preset from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a preset file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let preset = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), algorithm = %preset.algorithm, "Loaded preset");
        Ok(preset)
    }

    /// Build engine parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Color`] when a custom color is not valid hex.
    pub fn to_parameters(&self) -> Result<Parameters, ConfigError> {
        let mut params = Parameters::new()
            .algorithm(DitherAlgorithm::from_name_or_default(&self.algorithm))
            .palette_mode(PaletteMode::from_name_or_default(&self.palette))
            .strength(self.strength)
            .serpentine(self.serpentine)
            .gamma(self.gamma)
            .contrast(self.contrast)
            .brightness(self.brightness)
            .saturation(self.saturation)
            .bayer_size(self.bayer_size)
            .seed(self.seed)
            .pattern_scale(self.pattern_scale);

        if let Some(colors) = &self.colors {
            params = params.custom_palette(parse_colors(colors)?);
        }
        Ok(params)
    }
}

/// Parse hex color strings (`#RGB` or `#RRGGBB`, `#` optional)
pub fn parse_colors<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Rgb>, ConfigError> {
    let palette = dither_core::Palette::from_hex(colors)?;
    Ok(palette.colors().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_preset_is_default() {
        let preset = Preset::from_yaml("{}").unwrap();
        assert_eq!(preset, Preset::default());
        assert_eq!(preset.to_parameters().unwrap(), Parameters::default());
    }

    #[test]
    fn test_full_preset() {
        let yaml = r##"
algorithm: bayer-4x4
palette: gameboy
strength: 0.5
serpentine: false
gamma: 1.2
contrast: 1.1
brightness: -0.1
saturation: 0.0
bayer_size: 16
seed: 7
pattern_scale: 8
"##;
        let params = Preset::from_yaml(yaml).unwrap().to_parameters().unwrap();
        assert_eq!(params.algorithm, DitherAlgorithm::OrderedBayer4x4);
        assert_eq!(params.palette_mode, PaletteMode::GameBoy);
        assert!(!params.serpentine);
        assert_eq!(params.seed, 7);
        assert_eq!(params.pattern_scale, 8);
        assert_eq!(params.bayer_size, 16);
        assert!((params.brightness + 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_colors_switch_to_custom() {
        let yaml = r##"
colors: ["#000", "FF8800", "#ffffff"]
"##;
        let params = Preset::from_yaml(yaml).unwrap().to_parameters().unwrap();
        assert_eq!(params.palette_mode, PaletteMode::Custom);
        assert_eq!(
            params.custom_palette,
            Some(vec![Rgb::BLACK, Rgb::new(255, 136, 0), Rgb::WHITE])
        );
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let preset = Preset::from_yaml("colors: [\"#12\"]").unwrap();
        assert!(matches!(
            preset.to_parameters(),
            Err(ConfigError::Color(_))
        ));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let preset = Preset::from_yaml("algorithm: sharpen\npalette: ega").unwrap();
        let params = preset.to_parameters().unwrap();
        assert_eq!(params.algorithm, DitherAlgorithm::FloydSteinberg);
        assert_eq!(params.palette_mode, PaletteMode::Monochrome);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(matches!(
            Preset::from_yaml("strenght: 2"),
            Err(ConfigError::Parse(_))
        ));
    }
}
