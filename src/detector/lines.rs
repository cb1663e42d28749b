//! Needle localisation: smoothing, Canny edges, then line voting.
//!
//! [`locate_lines`] returns a [`NeedleLines`] iterator: finite, lazy in the
//! sense that endpoints are only produced through [`NeedleLines::segments`],
//! and not restartable. Iterating again requires running detection again.

use super::params::DetectionConfig;
use crate::angle::angular_difference;
use crate::edges::canny;
use crate::filters::gaussian_blur;
use crate::hough::lines;
use crate::image::ImageU8;
use crate::types::LineCandidate;
use log::debug;
use nalgebra::Point2;
use std::iter::FusedIterator;

/// Line candidates in accumulator order (strongest first).
#[derive(Debug)]
pub struct NeedleLines {
    inner: std::vec::IntoIter<LineCandidate>,
}

impl NeedleLines {
    fn new(candidates: Vec<LineCandidate>) -> Self {
        Self {
            inner: candidates.into_iter(),
        }
    }

    /// Project each remaining candidate to a drawable segment of half-length
    /// `extent` as it is consumed.
    pub fn segments(self, extent: f32) -> impl Iterator<Item = (Point2<f32>, Point2<f32>)> {
        self.map(move |line| line.endpoints(extent))
    }
}

impl Iterator for NeedleLines {
    type Item = LineCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NeedleLines {}
impl FusedIterator for NeedleLines {}

/// Binary edge map the needle stage votes on.
pub fn needle_edges(region: ImageU8<'_>, config: &DetectionConfig) -> crate::image::GrayImageU8 {
    let p = config.params();
    let smoothed = gaussian_blur(region, p.line_blur_kernel_size, p.line_blur_sigma);
    canny(smoothed.as_view(), p.edge_low, p.edge_high, p.edge_aperture)
}

/// Detect straight lines inside `region`.
pub fn locate_lines(region: ImageU8<'_>, config: &DetectionConfig) -> NeedleLines {
    if region.is_empty() {
        return NeedleLines::new(Vec::new());
    }
    let p = config.params();
    let edges = needle_edges(region, config);
    let candidates = lines::vote(
        edges.as_view(),
        p.rho_resolution,
        p.theta_resolution,
        p.line_vote_threshold,
    );
    debug!(
        "locate_lines: region={}x{} candidates={}",
        region.w,
        region.h,
        candidates.len()
    );
    NeedleLines::new(candidates)
}

/// Keep one line per physical edge: drop every candidate within `rho_tol`
/// and `theta_tol` of an earlier (stronger) kept one. The pipeline never
/// applies this on its own.
pub fn suppress_near_duplicates(
    candidates: impl IntoIterator<Item = LineCandidate>,
    rho_tol: f32,
    theta_tol: f32,
) -> Vec<LineCandidate> {
    let mut kept: Vec<LineCandidate> = Vec::new();
    for line in candidates {
        let duplicate = kept.iter().any(|k| {
            let dtheta = angular_difference(k.theta, line.theta);
            // near θ = 0/π the same line flips the sign of ρ
            let flipped = (k.theta - line.theta).abs() > std::f32::consts::FRAC_PI_2;
            let drho = if flipped {
                (k.rho + line.rho).abs()
            } else {
                (k.rho - line.rho).abs()
            };
            dtheta <= theta_tol && drho <= rho_tol
        });
        if !duplicate {
            kept.push(line);
        }
    }
    kept
}
