use serde::Serialize;
use std::time::Instant;

/// Wall-clock duration of one pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

/// Per-stage timings of a detection run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Run `stage`, record its duration under `label` and return its output.
    pub fn measure<T>(&mut self, label: &'static str, stage: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = stage();
        self.stages.push(StageTiming {
            label,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
        out
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_records_in_call_order() {
        let mut t = TimingBreakdown::default();
        let a = t.measure("first", || 2 + 2);
        t.measure("second", || ());
        assert_eq!(a, 4);
        let labels: Vec<_> = t.stages.iter().map(|s| s.label).collect();
        assert_eq!(labels, ["first", "second"]);
        assert!(t.stage_ms("first").is_some());
        assert!(t.stage_ms("missing").is_none());
    }
}
