#![allow(dead_code)]

use gauge_detector::image::GrayImageU8;

pub const BACKGROUND: u8 = 0;
pub const INK: u8 = 255;

/// Dark canvas with a bright ring of the given stroke centred on `(cx, cy)`.
pub fn ring(width: usize, height: usize, cx: f32, cy: f32, radius: f32, stroke: f32) -> GrayImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    GrayImageU8::from_fn(width, height, |x, y| {
        if on_ring(x, y, cx, cy, radius, stroke) {
            INK
        } else {
            BACKGROUND
        }
    })
}

/// Ring centred on the canvas crossed by a straight needle along
/// `x + y = size` (θ = 45° through the centre), `needle_halfwidth` pixels
/// either side of the line.
pub fn gauge(size: usize, radius: f32, stroke: f32, needle_halfwidth: f32) -> GrayImageU8 {
    let c = size as f32 / 2.0;
    GrayImageU8::from_fn(size, size, |x, y| {
        let offset = (x as f32 + y as f32 - 2.0 * c) / std::f32::consts::SQRT_2;
        if on_ring(x, y, c, c, radius, stroke) || offset.abs() <= needle_halfwidth {
            INK
        } else {
            BACKGROUND
        }
    })
}

/// Two rings of different contrast on one canvas.
pub fn two_rings(width: usize, height: usize) -> GrayImageU8 {
    GrayImageU8::from_fn(width, height, |x, y| {
        if on_ring(x, y, 70.0, 80.0, 40.0, 3.0) {
            INK
        } else if on_ring(x, y, 200.0, 90.0, 30.0, 3.0) {
            160
        } else {
            BACKGROUND
        }
    })
}

/// Vertical step: `low` left of column `edge_x`, `high` from it onwards.
pub fn step_edge(width: usize, height: usize, edge_x: usize, low: u8, high: u8) -> GrayImageU8 {
    GrayImageU8::from_fn(width, height, |x, _| if x < edge_x { low } else { high })
}

fn on_ring(x: usize, y: usize, cx: f32, cy: f32, radius: f32, stroke: f32) -> bool {
    (dist(x as f32, y as f32, cx, cy) - radius).abs() <= stroke / 2.0
}

fn dist(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    ((x - cx).powi(2) + (y - cy).powi(2)).sqrt()
}
