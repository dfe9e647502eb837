//! Error diffusion kernels.
//!
//! Each kernel lists the not-yet-visited neighbors that receive a share of
//! a pixel's quantization error, as `(dx, dy, weight)` with a shared
//! divisor. In the diagrams `X` marks the current pixel; scanning runs left
//! to right, so everything right of `X` and every lower row is still ahead.

/// An error diffusion kernel.
///
/// A neighbor at `(dx, dy)` receives `error * weight / divisor`. The total
/// propagated fraction is `sum(weights) / divisor`, which is 1 for most
/// kernels, 3/4 for Atkinson and 15/16 for Shiau-Fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries.
    ///
    /// `dx` is negated on reversed (serpentine) rows; `dy` is never negative.
    pub entries: &'static [(i32, i32, u8)],

    /// Shared weight denominator.
    pub divisor: u8,

    /// Largest `dy` in `entries`; the error buffer keeps `max_dy + 1` rows.
    pub max_dy: usize,
}

impl Kernel {
    /// Normalized weight of entry `i`.
    #[inline]
    pub fn weight(&self, i: usize) -> f32 {
        self.entries[i].2 as f32 / self.divisor as f32
    }

    /// Fraction of the error that stays inside the image for an interior pixel.
    pub fn propagation(&self) -> f32 {
        let sum: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        sum as f32 / self.divisor as f32
    }
}

/// Floyd-Steinberg (1976).
///
/// ```text
///        X   7
///    3   5   1      / 16
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    divisor: 16,
    max_dy: 1,
};

/// Atkinson, as used on the original Macintosh. Only 6/8 of the error is
/// passed on, which keeps highlights and shadows clean.
///
/// ```text
///        X   1   1
///    1   1   1
///        1          / 8
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
    max_dy: 2,
};

/// Jarvis, Judice and Ninke.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1      / 48
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

/// Stucki: the JJN footprint with power-of-two weights.
///
/// ```text
///            X   8   4
///    2   4   8   4   2
///    1   2   4   2   1      / 42
/// ```
pub const STUCKI: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
        (-2, 2, 1),
        (-1, 2, 2),
        (0, 2, 4),
        (1, 2, 2),
        (2, 2, 1),
    ],
    divisor: 42,
    max_dy: 2,
};

/// Burkes: Stucki without the third row.
///
/// ```text
///            X   8   4
///    2   4   8   4   2      / 32
/// ```
pub const BURKES: Kernel = Kernel {
    entries: &[
        (1, 0, 8),
        (2, 0, 4),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 8),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 32,
    max_dy: 1,
};

/// Sierra (three rows).
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2          / 32
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
    max_dy: 2,
};

/// Sierra two-row.
///
/// ```text
///            X   4   3
///    1   2   3   2   1      / 16
/// ```
pub const SIERRA_TWO_ROW: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 3),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 3),
        (1, 1, 2),
        (2, 1, 1),
    ],
    divisor: 16,
    max_dy: 1,
};

/// Sierra Lite ("filter lite").
///
/// ```text
///        X   2
///    1   1          / 4
/// ```
pub const SIERRA_LITE: Kernel = Kernel {
    entries: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    divisor: 4,
    max_dy: 1,
};

/// Fan: Floyd-Steinberg weights with the lower row rearranged.
///
/// ```text
///        X   7
///    3   1   5      / 16
/// ```
pub const FAN: Kernel = Kernel {
    entries: &[(1, 0, 7), (0, 1, 1), (1, 1, 5), (-1, 1, 3)],
    divisor: 16,
    max_dy: 1,
};

/// Shiau-Fan. The weights add up to 15, so 1/16 of the error is dropped.
///
/// ```text
///            X   4   1
///    1   1   2   4   2      / 16
/// ```
pub const SHIAU_FAN: Kernel = Kernel {
    entries: &[
        (1, 0, 4),
        (2, 0, 1),
        (-2, 1, 1),
        (-1, 1, 1),
        (0, 1, 2),
        (1, 1, 4),
        (2, 1, 2),
    ],
    divisor: 16,
    max_dy: 1,
};

/// Steven Pigeon.
///
/// ```text
///            X   2   1
///    1   2   2   2   1
///        1   1   1          / 14
/// ```
pub const STEVEN_PIGEON: Kernel = Kernel {
    entries: &[
        (1, 0, 2),
        (2, 0, 1),
        (-2, 1, 1),
        (-1, 1, 2),
        (0, 1, 2),
        (1, 1, 2),
        (2, 1, 1),
        (-1, 2, 1),
        (0, 2, 1),
        (1, 2, 1),
    ],
    divisor: 14,
    max_dy: 2,
};

/// "False" Floyd-Steinberg: three neighbors, no backward diagonal.
///
/// ```text
///    X   3
///    3   2          / 8
/// ```
pub const FALSE_FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[(1, 0, 3), (0, 1, 3), (1, 1, 2)],
    divisor: 8,
    max_dy: 1,
};
