use cobb_angle::config::{load_config, CaseConfig, OutputConfig};
use cobb_angle::io::{image_height, load_detections, load_image, write_json_file};
use cobb_angle::overlay::save_overlay;
use cobb_angle::CobbEstimator;
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    fs::create_dir_all(&config.output.dir)
        .map_err(|e| format!("Failed to create {}: {e}", config.output.dir.display()))?;

    let estimator = CobbEstimator::new(config.params.clone());
    let summaries: Vec<CaseSummary> = config
        .cases
        .par_iter()
        .map(|case| match run_case(&estimator, case, &config.output) {
            Ok(summary) => summary,
            Err(err) => {
                warn!("case {} failed: {err}", case.name);
                CaseSummary::failed(&case.name, err)
            }
        })
        .collect();

    for s in &summaries {
        match &s.angles {
            Some(angles) => println!(
                "{:<16} curve={} PT={:.1} MT={:.1} TL={:.1}",
                s.name,
                s.curve_type.as_deref().unwrap_or("-"),
                angles[0],
                angles[1],
                angles[2]
            ),
            None => println!(
                "{:<16} {}",
                s.name,
                s.message.as_deref().unwrap_or("failed")
            ),
        }
    }

    write_json_file(&config.output.summary_path(), &summaries)?;
    println!(
        "Wrote summary for {} case(s) to {}",
        summaries.len(),
        config.output.summary_path().display()
    );
    Ok(())
}

/// Failures of one case; only the user-facing message reaches the summary
/// for measurement errors.
enum CaseError {
    Io(String),
    Measure(cobb_angle::CobbError),
}

impl std::fmt::Display for CaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseError::Io(e) => write!(f, "{e}"),
            CaseError::Measure(e) => write!(f, "{e}"),
        }
    }
}

fn run_case(
    estimator: &CobbEstimator,
    case: &CaseConfig,
    output: &OutputConfig,
) -> Result<CaseSummary, CaseError> {
    let detections = load_detections(&case.detections).map_err(CaseError::Io)?;

    let image = match (&case.image, &case.overlay) {
        (Some(path), Some(_)) => Some(load_image(path).map_err(CaseError::Io)?),
        _ => None,
    };
    let height = match (case.image_height, &image, &case.image) {
        (Some(h), _, _) => h,
        (None, Some(img), _) => f64::from(img.height()),
        (None, None, Some(path)) => f64::from(image_height(path).map_err(CaseError::Io)?),
        (None, None, None) => {
            return Err(CaseError::Io(format!(
                "case {} needs either image or image_height",
                case.name
            )))
        }
    };
    debug!(
        "case {} detections={} image_height={height}",
        case.name,
        detections.len()
    );

    let report = estimator
        .estimate_with_diagnostics(&detections, height)
        .map_err(CaseError::Measure)?;
    write_json_file(&output.report_path(&case.name), &report).map_err(CaseError::Io)?;

    if let (Some(img), Some(path)) = (&image, &case.overlay) {
        save_overlay(img, &report.result, path).map_err(CaseError::Io)?;
    }

    Ok(CaseSummary {
        name: case.name.clone(),
        curve_type: Some(report.result.curve_type.to_string()),
        angles: Some(report.result.angles.map(|r| r.rounded_degrees())),
        message: None,
    })
}

fn usage() -> String {
    "Usage: cobb_angles <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CaseSummary {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    angles: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CaseSummary {
    fn failed(name: &str, err: CaseError) -> Self {
        let message = match err {
            CaseError::Io(e) => e,
            CaseError::Measure(e) => e.user_message().to_string(),
        };
        Self {
            name: name.to_string(),
            curve_type: None,
            angles: None,
            message: Some(message),
        }
    }
}
