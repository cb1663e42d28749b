use crate::detector::crop::CropWindow;
use crate::diagnostics::TimingBreakdown;
use crate::types::DetectionResult;
use serde::Serialize;

/// Result produced by [`GaugeDetector::process`](crate::GaugeDetector::process).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub trace: PipelineTrace,
}

/// What the pipeline executed for one image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    /// Circles that cleared every threshold (only the first is used).
    pub circle_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_candidates: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}
