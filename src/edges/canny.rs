//! Canny edge extraction on 8-bit grids.
//!
//! Pipeline: Sobel gradients (configurable aperture) → non-maximum
//! suppression along the gradient direction quantised to 0°/45°/90°/135° →
//! hysteresis. A pixel is a strong seed when its magnitude exceeds `high`,
//! a weak candidate when it exceeds `low`; weak candidates survive only when
//! 8-connected to a seed.
//!
//! NMS compares against the two neighbours along the gradient with `>` on the
//! "previous" side and `>=` on the "next" side so flat-topped ridges keep
//! exactly one pixel instead of vanishing.
use crate::edges::grad::{sobel_gradients, Grad};
use crate::image::{GrayImageU8, ImageF32, ImageU8, ImageView};

/// Value written for edge pixels in the binary output.
pub const EDGE_ON: u8 = 255;

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// Binary edge map together with the gradients it was derived from.
#[derive(Clone, Debug)]
pub struct CannyOutput {
    pub edges: GrayImageU8,
    pub grad: Grad,
}

/// Binary Canny edges (0 / 255).
pub fn canny(gray: ImageU8<'_>, low: f32, high: f32, aperture: usize) -> GrayImageU8 {
    canny_with_gradients(gray, low, high, aperture).edges
}

/// Canny edges plus the Sobel gradients, for consumers that also need the
/// local edge direction.
pub fn canny_with_gradients(gray: ImageU8<'_>, low: f32, high: f32, aperture: usize) -> CannyOutput {
    let (w, h) = (gray.w, gray.h);
    let grad = sobel_gradients(&ImageF32::from_u8(gray), aperture);
    if w < 3 || h < 3 {
        return CannyOutput {
            edges: GrayImageU8::filled(w, h, 0),
            grad,
        };
    }

    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let maxima = suppress_non_maxima(&grad, low);

    // 0 = none, 1 = weak, 2 = strong
    let mut out = vec![0u8; w * h];
    let mut stack = Vec::new();
    for (idx, &m) in maxima.iter().enumerate() {
        if m > high {
            out[idx] = EDGE_ON;
            stack.push(idx);
        }
    }

    while let Some(idx) = stack.pop() {
        let x = idx % w;
        let y = idx / w;
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let n = ny * w + nx;
                if out[n] == 0 && maxima[n] > low {
                    out[n] = EDGE_ON;
                    stack.push(n);
                }
            }
        }
    }

    let edges = GrayImageU8::new(w, h, out).unwrap_or_else(|| GrayImageU8::filled(w, h, 0));
    CannyOutput { edges, grad }
}

/// Magnitudes of local maxima along the gradient direction; everything else
/// (including the 1-pixel border) is zero.
fn suppress_non_maxima(grad: &Grad, low: f32) -> Vec<f32> {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut maxima = vec![0.0f32; w * h];

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0) == (gy >= 0.0);

            // (before, after) along the gradient direction
            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag > before && mag >= after {
                maxima[y * w + x] = mag;
            }
        }
    }

    maxima
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: usize, height: usize, split_x: usize) -> GrayImageU8 {
        GrayImageU8::from_fn(width, height, |x, _| if x < split_x { 20 } else { 220 })
    }

    fn edge_columns(edges: &GrayImageU8, y: usize) -> Vec<usize> {
        (0..edges.width())
            .filter(|&x| edges.get(x, y) == EDGE_ON)
            .collect()
    }

    #[test]
    fn vertical_step_yields_single_pixel_edge() {
        let img = step_image(32, 24, 16);
        let edges = canny(img.as_view(), 50.0, 200.0, 3);
        for y in 1..23 {
            let cols = edge_columns(&edges, y);
            assert_eq!(cols.len(), 1, "row {y} edge columns {cols:?}");
            assert!(cols[0] == 15 || cols[0] == 16, "row {y} edge at {:?}", cols);
        }
        assert!(edge_columns(&edges, 0).is_empty());
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImageU8::filled(16, 16, 128);
        let edges = canny(img.as_view(), 10.0, 20.0, 3);
        assert!(edges.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn weak_edges_need_a_strong_seed() {
        // contrast 20 gives an L1 magnitude of 80 on a hard step
        let img = GrayImageU8::from_fn(20, 20, |x, _| if x < 10 { 100 } else { 120 });
        let none = canny(img.as_view(), 50.0, 200.0, 3);
        assert!(none.as_raw().iter().all(|&v| v == 0));
        let some = canny(img.as_view(), 50.0, 70.0, 3);
        assert!(some.as_raw().iter().any(|&v| v == EDGE_ON));
    }

    #[test]
    fn tiny_grids_are_degenerate() {
        let img = GrayImageU8::filled(2, 5, 200);
        let out = canny(img.as_view(), 1.0, 2.0, 3);
        assert_eq!((out.width(), out.height()), (2, 5));
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }
}
