//! HSV representation used by the saturation step of preprocessing.
//!
//! Channels are floats on the 0..=1 scale and hue is in degrees. Values
//! outside the unit range are carried through rather than rejected, since
//! preprocessing clamps once at the very end.

/// Hue/saturation/value triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hsv {
    /// Hue angle in degrees, 0..360
    pub h: f32,
    /// Saturation, 0 for neutral grays
    pub s: f32,
    /// Value (the largest channel)
    pub v: f32,
}

impl Hsv {
    /// Convert from `[r, g, b]` floats.
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        let [r, g, b] = rgb;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };
        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == r {
            let h = 60.0 * (g - b) / delta;
            if h < 0.0 {
                h + 360.0
            } else {
                h
            }
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        Self { h, s, v: max }
    }

    /// Convert back to `[r, g, b]` floats.
    pub fn to_rgb(self) -> [f32; 3] {
        let Self { h, s, v } = self;
        let h6 = (h / 60.0).rem_euclid(6.0);
        let sector = h6.floor();
        let f = h6 - sector;

        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as u8 {
            0 => [v, t, p],
            1 => [q, v, p],
            2 => [p, v, t],
            3 => [p, q, v],
            4 => [t, p, v],
            _ => [v, p, q],
        }
    }

    /// Scale saturation by `factor`, never below zero.
    #[inline]
    pub fn scale_saturation(self, factor: f32) -> Self {
        Self {
            s: (self.s * factor).max(0.0),
            ..self
        }
    }
}
