//! Separable smoothing filters.
//!
//! Gaussian taps follow the usual convention for an odd kernel size `k`: when
//! `sigma <= 0` it is derived as `0.3 * ((k - 1) / 2 - 1) + 0.8`. Borders
//! replicate the outermost pixel (indices clamp to the image extents).

use crate::image::{GrayImageU8, ImageF32, ImageU8, ImageView};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Normalised Gaussian taps of odd length.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    sigma: f32,
}

impl GaussianKernel {
    /// Build a kernel of `size` taps. `size` must be odd and non-zero; the
    /// detection config guarantees this before any stage runs.
    pub fn new(size: usize, sigma: f32) -> Self {
        debug_assert!(size % 2 == 1, "gaussian kernel size must be odd");
        let size = size.max(1);
        let sigma = effective_sigma(size, sigma);
        let radius = (size / 2) as f32;
        let scale = -0.5 / (sigma * sigma);
        let mut taps: Vec<f32> = (0..size)
            .map(|i| {
                let d = i as f32 - radius;
                (d * d * scale).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Self { taps, sigma }
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Sigma actually used for a kernel of `size` taps.
pub fn effective_sigma(size: usize, sigma: f32) -> f32 {
    if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }
}

/// Gaussian smoothing of an 8-bit grid, returning a new rounded 8-bit grid.
pub fn gaussian_blur(gray: ImageU8<'_>, kernel_size: usize, sigma: f32) -> GrayImageU8 {
    if gray.is_empty() {
        return GrayImageU8::empty();
    }
    let kernel = GaussianKernel::new(kernel_size, sigma);
    apply(&kernel, &ImageF32::from_u8(gray)).to_u8()
}

/// Apply a separable filter horizontally then vertically.
pub fn apply<F: SeparableFilter + ?Sized>(filter: &F, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = horiz.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius, w);
                acc += tap * src_row[sx];
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, h);
            let src_row = horiz.row(sy);
            for (dst, &s) in dst_row.iter_mut().zip(src_row) {
                *dst += tap * s;
            }
        }
    }
    out
}

#[inline]
pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 || idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalised_and_symmetric() {
        let k = GaussianKernel::new(9, 1.0);
        let taps = k.taps();
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-7);
        }
        assert!(taps[4] > taps[3]);
    }

    #[test]
    fn zero_sigma_is_derived_from_size() {
        assert!((effective_sigma(5, 0.0) - 1.1).abs() < 1e-6);
        assert!((effective_sigma(5, 2.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn blur_keeps_flat_images_flat() {
        let flat = GrayImageU8::filled(12, 9, 77);
        let out = gaussian_blur(flat.as_view(), 5, 0.0);
        assert_eq!(out, flat);
    }

    #[test]
    fn blur_spreads_a_single_spike() {
        let spike = GrayImageU8::from_fn(11, 11, |x, y| if x == 5 && y == 5 { 255 } else { 0 });
        let out = gaussian_blur(spike.as_view(), 5, 1.0);
        assert!(out.get(5, 5) < 255);
        assert!(out.get(4, 5) > 0);
        assert_eq!(out.get(4, 5), out.get(6, 5));
        assert_eq!(out.get(0, 0), 0);
    }

    #[test]
    fn blur_of_empty_grid_is_empty() {
        let empty = GrayImageU8::empty();
        assert!(gaussian_blur(empty.as_view(), 5, 0.0).is_empty());
    }
}
