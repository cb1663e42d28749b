//! Gauge detector: a dial circle followed by needle lines inside it.
//!
//! Overview
//! - Smooths the input and runs a gradient-directed circle Hough transform;
//!   the strongest circle is taken as the dial.
//! - Crops a `2r × 2r` window around the dial centre, clamped to the image.
//! - Smooths the crop, extracts Canny edges and votes them into a `(ρ, θ)`
//!   accumulator. Every cell above the vote threshold is a needle candidate.
//!
//! Modules
//! - [`params`] – validated configuration shared by every stage.
//! - [`circle`] – dial localisation.
//! - [`crop`] – clamped region extraction.
//! - [`lines`] – needle localisation and optional duplicate suppression.
//! - `pipeline` – the [`GaugeDetector`] orchestration.
//!
//! Key Ideas
//! - Line candidates are reported in crop-local coordinates together with the
//!   crop window; [`DetectionResult::lines_in_image`](crate::DetectionResult::lines_in_image)
//!   maps them back.
//! - Nothing is retried or adapted: one configuration, one pass.

pub mod circle;
pub mod crop;
pub mod lines;
pub mod params;
mod pipeline;

pub use circle::{circle_candidates, locate_gauge};
pub use crop::{crop, CropWindow};
pub use lines::{locate_lines, suppress_near_duplicates, NeedleLines};
pub use params::{ConfigError, DetectionConfig, DetectionParams};
pub use pipeline::{detect_batch, detect_gauge, GaugeDetector};
