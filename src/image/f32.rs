//! Float working buffer for smoothing and gradient passes.
//!
//! Intensities keep the 0..=255 scale of the 8-bit input, so Canny thresholds
//! apply to gradient magnitudes directly.
use crate::image::traits::ImageView;
use crate::image::{GrayImageU8, ImageU8};

/// Tightly packed row-major `f32` grid.
#[derive(Clone, Debug)]
pub struct ImageF32 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-filled `w × h` buffer.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    pub fn from_u8(gray: ImageU8<'_>) -> Self {
        let mut data = Vec::with_capacity(gray.w * gray.h);
        for row in gray.rows() {
            data.extend(row.iter().map(|&v| v as f32));
        }
        Self {
            w: gray.w,
            h: gray.h,
            data,
        }
    }

    /// Round and saturate into an owned 8-bit grid.
    pub fn to_u8(&self) -> GrayImageU8 {
        GrayImageU8::from_fn(self.w, self.h, |x, y| {
            self.get(x, y).round().clamp(0.0, 255.0) as u8
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.w + x] = v;
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        &mut self.data[y * self.w..(y + 1) * self.w]
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    fn width(&self) -> usize {
        self.w
    }

    fn height(&self) -> usize {
        self.h
    }

    fn stride(&self) -> usize {
        self.w
    }

    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_rounds_and_saturates() {
        let gray = GrayImageU8::from_fn(3, 2, |x, y| (x * 100 + y) as u8);
        let mut f = ImageF32::from_u8(gray.as_view());
        assert_eq!(f.get(2, 1), 201.0);
        f.set(0, 0, 300.0);
        f.set(1, 0, -4.0);
        f.set(2, 0, 12.6);
        let back = f.to_u8();
        assert_eq!(back.get(0, 0), 255);
        assert_eq!(back.get(1, 0), 0);
        assert_eq!(back.get(2, 0), 13);
        assert_eq!(back.get(1, 1), 101);
    }
}
