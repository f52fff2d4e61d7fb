//! Separable box blur.

use rayon::prelude::*;
use tracing::debug;

use crate::heightmap::Heightmap;

/// Blur a heightmap with a `(2r+1)`-tap box filter along each axis.
///
/// Runs a horizontal mean over `[x-r, x+r]` and then a vertical mean over the
/// horizontal result. Taps outside the grid are dropped, so the window narrows
/// at the edges instead of wrapping or reflecting. A radius of zero returns
/// the input untouched.
///
/// Every output sample is a mean of input samples, so the result stays within
/// the input's `[min, max]`.
///
/// # Example
///
/// ```
/// use mesh_heightmap::{Heightmap, smooth};
///
/// let hm = Heightmap::new(3, 1, vec![0.0, 0.0, 3.0]).unwrap();
/// let blurred = smooth(hm, 1);
/// assert_eq!(blurred.values(), &[0.0, 1.0, 1.5]);
/// ```
#[must_use]
pub fn smooth(heightmap: Heightmap, radius: usize) -> Heightmap {
    if radius == 0 {
        return heightmap;
    }

    let Heightmap {
        width,
        height,
        values,
    } = heightmap;
    debug!("Box blur r={} over {}x{} grid", radius, width, height);

    let mut horizontal = vec![0.0; values.len()];
    horizontal
        .par_chunks_mut(width)
        .zip(values.par_chunks(width))
        .for_each(|(out, row)| {
            for (x, slot) in out.iter_mut().enumerate() {
                let lo = x.saturating_sub(radius);
                let hi = x.saturating_add(radius).min(width - 1);
                *slot = mean(&row[lo..=hi]);
            }
        });

    // Reuse the source buffer for the vertical pass
    let mut vertical = values;
    vertical
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out)| {
            let lo = y.saturating_sub(radius);
            let hi = y.saturating_add(radius).min(height - 1);
            #[allow(clippy::cast_precision_loss)]
            let taps = (hi - lo + 1) as f64;
            for (x, slot) in out.iter_mut().enumerate() {
                let sum: f64 = (lo..=hi).map(|yy| horizontal[yy * width + x]).sum();
                *slot = sum / taps;
            }
        });

    Heightmap {
        width,
        height,
        values: vertical,
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}
