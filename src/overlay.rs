//! Debug overlay of a detection result on top of the input image.
//!
//! The dial is drawn as a green ring with a red centre dot; every needle
//! candidate is drawn as a red segment of half-length
//! [`DEFAULT_LINE_EXTENT`], endpoints rounded to whole pixels and clipped by
//! the canvas.

use crate::image::ImageU8;
use crate::types::{DetectionResult, DEFAULT_LINE_EXTENT};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};

const CIRCLE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const CENTER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const LINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const CIRCLE_THICKNESS: i32 = 2;
const CENTER_RADIUS: i32 = 2;

/// Gray → RGB copy of `base` with `result` painted on it.
pub fn render(base: ImageU8<'_>, result: &DetectionResult) -> RgbImage {
    let mut canvas = RgbImage::from_fn(base.w as u32, base.h as u32, |x, y| {
        let v = base.get(x as usize, y as usize);
        Rgb([v, v, v])
    });
    if base.is_empty() {
        return canvas;
    }

    let Some(circle) = result.circle() else {
        return canvas;
    };

    let center = circle.center();
    for t in 0..CIRCLE_THICKNESS {
        let r = circle.radius + t;
        if r > 0 {
            draw_hollow_circle_mut(&mut canvas, center, r, CIRCLE_COLOR);
        }
    }
    draw_filled_circle_mut(&mut canvas, center, CENTER_RADIUS, CENTER_COLOR);

    for line in result.lines_in_image() {
        let (a, b) = line.endpoints_px(DEFAULT_LINE_EXTENT);
        draw_line_segment_mut(
            &mut canvas,
            (a.0 as f32, a.1 as f32),
            (b.0 as f32, b.1 as f32),
            LINE_COLOR,
        );
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::CropWindow;
    use crate::image::GrayImageU8;
    use crate::types::{CircleCandidate, LineCandidate};

    #[test]
    fn not_found_is_a_plain_gray_copy() {
        let gray = GrayImageU8::from_fn(12, 8, |x, y| (x * 10 + y) as u8);
        let out = render(gray.as_view(), &DetectionResult::NotFound);
        assert_eq!(out.dimensions(), (12, 8));
        assert_eq!(out.get_pixel(3, 2), &Rgb([32, 32, 32]));
    }

    #[test]
    fn found_result_paints_circle_centre_and_lines() {
        let gray = GrayImageU8::filled(60, 60, 100);
        let result = DetectionResult::GaugeFound {
            circle: CircleCandidate {
                center_x: 30,
                center_y: 30,
                radius: 20,
                votes: 100,
                radius_support: 100,
            },
            region: CropWindow {
                x0: 10,
                y0: 10,
                width: 40,
                height: 40,
            },
            // horizontal line y = 5 in the crop, y = 15 in the image
            lines: vec![LineCandidate {
                rho: 5.0,
                theta: std::f32::consts::FRAC_PI_2,
                votes: 50,
            }],
        };
        let out = render(gray.as_view(), &result);
        assert_eq!(out.get_pixel(30, 30), &CENTER_COLOR);
        assert_eq!(out.get_pixel(50, 30), &CIRCLE_COLOR);
        assert_eq!(out.get_pixel(3, 15), &LINE_COLOR);
        assert_eq!(out.get_pixel(3, 40), &Rgb([100, 100, 100]));
    }

    #[test]
    fn empty_base_renders_empty_canvas() {
        let empty = GrayImageU8::empty();
        let out = render(empty.as_view(), &DetectionResult::NotFound);
        assert_eq!(out.dimensions(), (0, 0));
    }
}
