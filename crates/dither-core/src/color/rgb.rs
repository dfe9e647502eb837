//! 8-bit RGB sample type.
//!
//! Every buffer the engine reads or writes is made of [`Rgb`] samples. The
//! float path used inside the scanning loops goes through [`Rgb::to_f32`]
//! and [`Rgb::from_clamped`].

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// A color sample with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a neutral gray with all channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as floats on the 0..=255 scale.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Clamp float channels to 0..=255 and truncate toward zero.
    ///
    /// Truncation (not rounding) is what every scanning loop uses before
    /// the nearest-color lookup, so `254.9` becomes `254`.
    #[inline]
    pub fn from_clamped(value: [f32; 3]) -> Self {
        Self::new(
            value[0].clamp(0.0, 255.0) as u8,
            value[1].clamp(0.0, 255.0) as u8,
            value[2].clamp(0.0, 255.0) as u8,
        )
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Format as an uppercase `#RRGGBB` string.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive, with
    /// surrounding whitespace trimmed. Shorthand digits expand by repetition
    /// (`#F00` is `#FF0000`).
    ///
    /// ```
    /// use dither_core::Rgb;
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!("#8BAC0F".parse::<Rgb>().unwrap(), Rgb::new(139, 172, 15));
        assert_eq!("ff004d".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 77));
    }

    #[test]
    fn test_parse_shorthand_hex() {
        assert_eq!("#FFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(" 0a0 ".parse::<Rgb>().unwrap(), Rgb::new(0, 170, 0));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "#12345".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        );
        assert!(matches!(
            "#GG0000".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        // Multi-byte characters must not panic on slicing
        assert!("#ÄÄÄ".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgb::new(255, 163, 0).to_hex(), "#FFA300");
        assert_eq!(Rgb::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_from_clamped_truncates() {
        assert_eq!(
            Rgb::from_clamped([254.9, -12.0, 300.0]),
            Rgb::new(254, 0, 255)
        );
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Rgb::BLACK.distance_sq(Rgb::WHITE), 3 * 255 * 255);
        assert_eq!(Rgb::gray(10).distance_sq(Rgb::new(13, 6, 10)), 9 + 16);
    }
}
