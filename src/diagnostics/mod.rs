//! Diagnostics data model exposed by the detector and the command-line tools.
//!
//! `DetectionReport` is the entry point returned by
//! [`GaugeDetector::process`](crate::GaugeDetector::process), bundling the
//! detection outcome with a `PipelineTrace` describing what each stage did.

pub mod pipeline;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace};
pub use timing::{StageTiming, TimingBreakdown};
