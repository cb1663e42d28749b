//! Axis-aligned region extraction around a detected circle.
//!
//! Rounding rule: the requested width and height are halved with floor
//! division, so the requested window is
//! `[cx - w/2, cx + w/2) × [cy - h/2, cy + h/2)` and odd sizes lose one pixel.
//! The window is then intersected with the grid; reads never leave the grid
//! and never wrap. A window entirely outside the grid yields an empty 0×0 grid.

use crate::image::{GrayImageU8, ImageU8};
use serde::{Deserialize, Serialize};

/// Clamped crop window in source-grid coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropWindow {
    pub x0: usize,
    pub y0: usize,
    pub width: usize,
    pub height: usize,
}

impl CropWindow {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Intersection of the requested window with a `grid_w × grid_h` grid.
pub fn clamped_window(
    grid_w: usize,
    grid_h: usize,
    center: (i32, i32),
    size: (usize, usize),
) -> CropWindow {
    let (cx, cy) = (center.0 as i64, center.1 as i64);
    let half_w = (size.0 / 2) as i64;
    let half_h = (size.1 / 2) as i64;

    let x0 = (cx - half_w).clamp(0, grid_w as i64);
    let x1 = (cx + half_w).clamp(0, grid_w as i64);
    let y0 = (cy - half_h).clamp(0, grid_h as i64);
    let y1 = (cy + half_h).clamp(0, grid_h as i64);

    if x1 <= x0 || y1 <= y0 {
        return CropWindow::default();
    }
    CropWindow {
        x0: x0 as usize,
        y0: y0 as usize,
        width: (x1 - x0) as usize,
        height: (y1 - y0) as usize,
    }
}

/// Copy the pixels of `window` into a new grid.
pub fn extract(grid: ImageU8<'_>, window: CropWindow) -> GrayImageU8 {
    if window.is_empty() {
        return GrayImageU8::empty();
    }
    GrayImageU8::from_fn(window.width, window.height, |x, y| {
        grid.get(window.x0 + x, window.y0 + y)
    })
}

/// Crop a `size` window centred on `center`, clamped to the grid.
pub fn crop(grid: ImageU8<'_>, center: (i32, i32), size: (usize, usize)) -> GrayImageU8 {
    extract(grid, clamped_window(grid.w, grid.h, center, size))
}
