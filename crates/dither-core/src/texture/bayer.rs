//! Recursive Bayer (ordered dither) matrices.
//!
//! The 2x2 seed `[[0, 2], [3, 1]]` expands by quadrants: each cell of the
//! half-size matrix is multiplied by 4 and offset by 0 (top-left), 2
//! (top-right), 3 (bottom-left) or 1 (bottom-right). Ranks are then divided
//! by `size²`, so every map holds each multiple of `1/size²` exactly once.
//!
//! ```text
//!   size 2          size 4
//!   0  2            0   8   2  10
//!   3  1           12   4  14   6
//!                   3  11   1   9
//!                  15   7  13   5
//! ```

use super::ThresholdMap;

/// Generate a `size × size` Bayer threshold map with values in `[0, 1)`.
///
/// `size` must be a power of two; other values are rounded up to the next
/// power of two, and anything below 2 becomes 2.
pub fn generate_bayer_matrix(size: usize) -> ThresholdMap {
    let size = size.max(2).next_power_of_two();
    let scale = (size * size) as f32;
    let values = bayer_ranks(size)
        .into_iter()
        .map(|rank| rank as f32 / scale)
        .collect();
    ThresholdMap::new(size, values)
}

/// Integer ranks `0..size²` of the Bayer matrix, row-major.
fn bayer_ranks(size: usize) -> Vec<u32> {
    if size <= 1 {
        return vec![0];
    }
    let half = size / 2;
    let inner = bayer_ranks(half);
    let mut ranks = vec![0u32; size * size];
    for y in 0..half {
        for x in 0..half {
            let base = 4 * inner[y * half + x];
            ranks[y * size + x] = base;
            ranks[y * size + x + half] = base + 2;
            ranks[(y + half) * size + x] = base + 3;
            ranks[(y + half) * size + x + half] = base + 1;
        }
    }
    ranks
}
