//! Image gradients with separable Sobel kernels and L1 magnitude.
//!
//! A Sobel kernel of aperture `k` is the outer product of a binomial smoothing
//! row of length `k` and a derivative row (binomial of length `k - 2`
//! convolved with `[-1, 0, 1]`). For `k = 3` this is the classic
//! `[1, 2, 1] ⊗ [-1, 0, 1]` pair.
//!
//! Complexity: O(W·H·k) per pass; memory: four float buffers.
use crate::filters::clamp_index;
use crate::image::{ImageF32, ImageView};

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative (positive when intensity grows downwards)
    pub gy: ImageF32,
    /// L1 magnitude per pixel: `|gx| + |gy|`
    pub mag: ImageF32,
}

fn binomial_row(len: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..len {
        let mut next = vec![0.0f32; row.len() + 1];
        for (i, &v) in row.iter().enumerate() {
            next[i] += v;
            next[i + 1] += v;
        }
        row = next;
    }
    row
}

/// Smoothing and derivative taps for a Sobel aperture.
pub(crate) fn sobel_taps(aperture: usize) -> (Vec<f32>, Vec<f32>) {
    let aperture = aperture.max(3);
    let smooth = binomial_row(aperture);
    let base = binomial_row(aperture - 2);
    let mut deriv = vec![0.0f32; aperture];
    for (i, &b) in base.iter().enumerate() {
        deriv[i] -= b;
        deriv[i + 2] += b;
    }
    (smooth, deriv)
}

fn convolve_rows(src: &ImageF32, taps: &[f32]) -> ImageF32 {
    let radius = (taps.len() / 2) as isize;
    let mut out = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        let src_row = src.row(y);
        let dst_row = out.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                acc += tap * src_row[clamp_index(x as isize + k as isize - radius, src.w)];
            }
            *dst = acc;
        }
    }
    out
}

fn convolve_cols(src: &ImageF32, taps: &[f32]) -> ImageF32 {
    let radius = (taps.len() / 2) as isize;
    let mut out = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let src_row = src.row(clamp_index(y as isize + k as isize - radius, src.h));
            for (dst, &s) in dst_row.iter_mut().zip(src_row) {
                *dst += tap * s;
            }
        }
    }
    out
}

/// Compute Sobel gradients of the given aperture on a single-channel image.
pub fn sobel_gradients(l: &ImageF32, aperture: usize) -> Grad {
    let (w, h) = (l.w, l.h);
    if w == 0 || h == 0 {
        return Grad {
            gx: ImageF32::new(w, h),
            gy: ImageF32::new(w, h),
            mag: ImageF32::new(w, h),
        };
    }

    let (smooth, deriv) = sobel_taps(aperture);
    let gx = convolve_cols(&convolve_rows(l, &deriv), &smooth);
    let gy = convolve_cols(&convolve_rows(l, &smooth), &deriv);

    let mut mag = ImageF32::new(w, h);
    for ((m, &x), &y) in mag.data.iter_mut().zip(&gx.data).zip(&gy.data) {
        *m = x.abs() + y.abs();
    }

    Grad { gx, gy, mag }
}
