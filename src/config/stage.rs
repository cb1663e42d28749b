//! Shared configuration of the single-stage demo tools.
use crate::DetectionConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct StageToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub detection: DetectionConfig,
    pub output: StageOutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StageOutputConfig {
    /// Intermediate grid (smoothed input or edge map) for inspection.
    pub debug_image: Option<PathBuf>,
    pub json_out: PathBuf,
}

pub fn load_config(path: &Path) -> Result<StageToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
