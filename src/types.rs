use crate::detector::crop::CropWindow;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Half-length used when projecting a line to a drawable segment.
pub const DEFAULT_LINE_EXTENT: f32 = 1000.0;

/// A detected circle in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleCandidate {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: i32,
    /// Votes collected by the 3×3 accumulator block around the centre.
    pub votes: u32,
    /// Number of edge pixels supporting the chosen radius.
    pub radius_support: u32,
}

impl CircleCandidate {
    pub fn center(&self) -> (i32, i32) {
        (self.center_x, self.center_y)
    }
}

/// A line in normal form: `x·cos θ + y·sin θ = ρ`, with `θ ∈ [0, π)`.
///
/// Endpoints are only ever derived on demand; `(ρ, θ)` is the canonical
/// representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCandidate {
    pub rho: f32,
    pub theta: f32,
    pub votes: u32,
}

impl LineCandidate {
    pub fn theta_deg(&self) -> f32 {
        self.theta.to_degrees()
    }

    /// Unit normal `(cos θ, sin θ)`.
    pub fn normal(&self) -> Vector2<f32> {
        Vector2::new(self.theta.cos(), self.theta.sin())
    }

    /// Foot of the perpendicular from the origin.
    pub fn foot(&self) -> Point2<f32> {
        Point2::from(self.normal() * self.rho)
    }

    /// Two points `extent` pixels either side of the foot point.
    pub fn endpoints(&self, extent: f32) -> (Point2<f32>, Point2<f32>) {
        let n = self.normal();
        let dir = Vector2::new(-n.y, n.x);
        let foot = self.foot();
        (foot + dir * extent, foot - dir * extent)
    }

    /// Endpoints rounded to integer pixel coordinates.
    pub fn endpoints_px(&self, extent: f32) -> ((i32, i32), (i32, i32)) {
        let (a, b) = self.endpoints(extent);
        (
            (a.x.round() as i32, a.y.round() as i32),
            (b.x.round() as i32, b.y.round() as i32),
        )
    }

    /// The same line expressed in a frame whose origin sits at `(-dx, -dy)`
    /// relative to the current one, i.e. after shifting every point by
    /// `(dx, dy)`. Used to map crop-local lines back to the full image.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let n = self.normal();
        Self {
            rho: self.rho + dx * n.x + dy * n.y,
            ..*self
        }
    }

    /// Signed distance from `(x, y)` to the line.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let n = self.normal();
        x * n.x + y * n.y - self.rho
    }
}

/// Outcome of a full two-stage detection run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DetectionResult {
    /// A dial was located. `lines` are in the coordinates of `region`
    /// (the clamped crop window), in accumulator order.
    #[serde(rename_all = "camelCase")]
    GaugeFound {
        circle: CircleCandidate,
        region: CropWindow,
        lines: Vec<LineCandidate>,
    },
    /// No circle cleared the configured thresholds.
    NotFound,
}

impl DetectionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, DetectionResult::GaugeFound { .. })
    }

    pub fn circle(&self) -> Option<&CircleCandidate> {
        match self {
            DetectionResult::GaugeFound { circle, .. } => Some(circle),
            DetectionResult::NotFound => None,
        }
    }

    /// Line candidates in crop-local coordinates (empty when not found).
    pub fn lines(&self) -> &[LineCandidate] {
        match self {
            DetectionResult::GaugeFound { lines, .. } => lines,
            DetectionResult::NotFound => &[],
        }
    }

    /// Line candidates mapped into full-image coordinates.
    pub fn lines_in_image(&self) -> Vec<LineCandidate> {
        match self {
            DetectionResult::GaugeFound { region, lines, .. } => lines
                .iter()
                .map(|l| l.translated(region.x0 as f32, region.y0 as f32))
                .collect(),
            DetectionResult::NotFound => Vec::new(),
        }
    }
}
