//! JSON configuration for the `cobb_angles` tool.
use crate::params::EstimatorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One radiograph to measure.
///
/// The image height comes from `image_height` when given, otherwise from the
/// header of `image`. An overlay is rendered only when both `image` and
/// `overlay` are set.
#[derive(Clone, Debug, Deserialize)]
pub struct CaseConfig {
    pub name: String,
    pub detections: PathBuf,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub image_height: Option<f64>,
    #[serde(default)]
    pub overlay: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl OutputConfig {
    pub fn report_path(&self, case: &str) -> PathBuf {
        self.dir.join(format!("{case}.json"))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join("summary.json")
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ToolConfig {
    pub cases: Vec<CaseConfig>,
    pub output: OutputConfig,
    #[serde(default)]
    pub params: EstimatorParams,
}

pub fn parse_config(json: &str) -> Result<ToolConfig, String> {
    serde_json::from_str(json).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> Result<ToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_default_params() {
        let cfg = parse_config(
            r#"{
                "cases": [{ "name": "a", "detections": "a.json", "image_height": 512 }],
                "output": { "dir": "out" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.cases.len(), 1);
        assert_eq!(cfg.cases[0].image_height, Some(512.0));
        assert!(cfg.cases[0].image.is_none());
        assert_eq!(cfg.params.filter.score_threshold, 0.5);
        assert_eq!(cfg.output.report_path("a"), PathBuf::from("out/a.json"));
    }

    #[test]
    fn missing_output_is_an_error() {
        let err = parse_config(r#"{ "cases": [] }"#).unwrap_err();
        assert!(err.contains("output"), "{err}");
    }
}
