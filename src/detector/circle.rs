//! Dial localisation: smoothing followed by circle voting.
use super::params::DetectionConfig;
use crate::filters::gaussian_blur;
use crate::hough::circles;
use crate::image::ImageU8;
use crate::types::CircleCandidate;
use log::debug;

/// All circles supported by the smoothed grid, strongest first.
pub fn circle_candidates(raw: ImageU8<'_>, config: &DetectionConfig) -> Vec<CircleCandidate> {
    if raw.is_empty() {
        return Vec::new();
    }
    let p = config.params();
    let smoothed = gaussian_blur(raw, p.blur_kernel_size, p.blur_sigma);
    circles::vote(smoothed.as_view(), &config.circle_vote_params())
}

/// The best-supported circle, or `None` for a featureless/degenerate grid.
pub fn locate_gauge(raw: ImageU8<'_>, config: &DetectionConfig) -> Option<CircleCandidate> {
    let candidates = circle_candidates(raw, config);
    debug!("locate_gauge: {} circle candidates", candidates.len());
    candidates.into_iter().next()
}
