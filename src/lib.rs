#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod image;
pub mod overlay;
pub mod types;

// Building blocks of the stages; public for tools and experiments.
pub mod angle;
pub mod edges;
pub mod filters;
pub mod hough;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{
    crop, detect_batch, detect_gauge, locate_gauge, locate_lines, ConfigError, CropWindow,
    DetectionConfig, DetectionParams, GaugeDetector, NeedleLines,
};
pub use crate::types::{CircleCandidate, DetectionResult, LineCandidate};

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use gauge_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (320usize, 240usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let det = GaugeDetector::new(DetectionConfig::default());
/// match det.detect(img) {
///     DetectionResult::GaugeFound { circle, lines, .. } => {
///         println!("dial r={} with {} needle candidates", circle.radius, lines.len())
///     }
///     DetectionResult::NotFound => println!("no dial"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{DetectionConfig, DetectionParams, DetectionResult, GaugeDetector};
}
