use crate::DetectionConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the [`DetectionReport`](crate::DetectionReport) JSON.
    pub json_out: Option<PathBuf>,
    /// Where to write the rendered overlay (PNG, JPEG, ... by extension).
    pub overlay_out: Option<PathBuf>,
}

/// Configuration of the `gauge_detector` binary.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    /// Validated while parsing; a bad value fails the whole load.
    #[serde(default)]
    pub detection: DetectionConfig,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(contents: &str) -> Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
