//! Edge processing utilities: image gradients and Canny edge extraction.
//!
//! - Gradient computation with separable Sobel kernels of aperture 3, 5 or 7,
//!   returning `gx`, `gy` and an L1 magnitude.
//! - Canny-style extraction: direction-aligned non-maximum suppression over
//!   the magnitude followed by hysteresis with a low/high threshold pair. The
//!   result is a binary grid (0 / 255).
//!
//! Borders replicate the outermost pixel during gradient computation; the
//! outermost 1-pixel frame never produces edges.

pub mod canny;
pub mod grad;

pub use canny::{canny, canny_with_gradients, CannyOutput, EDGE_ON};
pub use grad::{sobel_gradients, Grad};
