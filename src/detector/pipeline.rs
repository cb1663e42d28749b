//! Two-stage gauge reading: dial circle → crop → needle lines.
//!
//! The [`GaugeDetector`] exposes a small API: feed a grayscale image and get
//! the dial circle plus every needle line candidate found inside the crop
//! around it. A missing dial is a regular [`DetectionResult::NotFound`]
//! outcome; the pipeline never retries with other parameters.
//!
//! Typical usage:
//! ```no_run
//! use gauge_detector::{DetectionConfig, GaugeDetector};
//! use gauge_detector::image::GrayImageU8;
//!
//! # fn example(gray: &GrayImageU8) {
//! let detector = GaugeDetector::new(DetectionConfig::default());
//! let report = detector.process(gray.as_view());
//! if let Some(circle) = report.result.circle() {
//!     println!("dial at {:?} r={}", circle.center(), circle.radius);
//! }
//! # }
//! ```
use super::circle::circle_candidates;
use super::crop::{clamped_window, extract};
use super::lines::locate_lines;
use super::params::DetectionConfig;
use crate::diagnostics::{DetectionReport, InputDescriptor, PipelineTrace, TimingBreakdown};
use crate::image::{GrayImageU8, ImageU8};
use crate::types::DetectionResult;
use log::debug;
use std::time::Instant;

/// Stateless detector bound to one configuration.
#[derive(Clone, Debug, Default)]
pub struct GaugeDetector {
    config: DetectionConfig,
}

impl GaugeDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Run both stages, returning only the outcome.
    pub fn detect(&self, gray: ImageU8<'_>) -> DetectionResult {
        detect_gauge(gray, &self.config)
    }

    /// Run both stages and report per-stage timings and counts.
    pub fn process(&self, gray: ImageU8<'_>) -> DetectionReport {
        run_stages(gray, &self.config)
    }
}

/// Locate the dial, crop around it and collect needle line candidates.
pub fn detect_gauge(raw: ImageU8<'_>, config: &DetectionConfig) -> DetectionResult {
    run_stages(raw, config).result
}

/// Detect gauges in independent images. With the `parallel` feature the
/// images are processed on the rayon pool; results keep input order.
pub fn detect_batch(images: &[GrayImageU8], config: &DetectionConfig) -> Vec<DetectionResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        images
            .par_iter()
            .map(|img| detect_gauge(img.as_view(), config))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        images
            .iter()
            .map(|img| detect_gauge(img.as_view(), config))
            .collect()
    }
}

fn run_stages(raw: ImageU8<'_>, config: &DetectionConfig) -> DetectionReport {
    let total_start = Instant::now();
    let mut timings = TimingBreakdown::default();
    debug!("detect_gauge start w={} h={}", raw.w, raw.h);

    let circles = timings.measure("circle", || circle_candidates(raw, config));
    let mut trace = PipelineTrace {
        input: InputDescriptor {
            width: raw.w,
            height: raw.h,
        },
        timings: TimingBreakdown::default(),
        circle_candidates: circles.len(),
        crop: None,
        line_candidates: None,
    };

    let Some(circle) = circles.first().copied() else {
        debug!("detect_gauge: no circle cleared the thresholds");
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        trace.timings = timings;
        return DetectionReport {
            result: DetectionResult::NotFound,
            trace,
        };
    };

    let side = 2 * circle.radius.max(0) as usize;
    let window = clamped_window(raw.w, raw.h, circle.center(), (side, side));
    let region = timings.measure("crop", || extract(raw, window));
    debug!(
        "detect_gauge: circle=({}, {}) r={} crop={:?}",
        circle.center_x, circle.center_y, circle.radius, window
    );

    let lines: Vec<_> = timings.measure("lines", || locate_lines(region.as_view(), config).collect());
    debug!("detect_gauge: {} line candidates", lines.len());

    trace.crop = Some(window);
    trace.line_candidates = Some(lines.len());
    timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    trace.timings = timings;

    DetectionReport {
        result: DetectionResult::GaugeFound {
            circle,
            region: window,
            lines,
        },
        trace,
    }
}
