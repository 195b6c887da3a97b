use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub struct PredictionSettings {
    /// Score returned for users never seen in the training source
    pub fallback_rating: f64,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            fallback_rating: 3.0,
        }
    }
}

pub struct DataSettings {
    pub training_path: PathBuf,
    pub testing_path: PathBuf,
    pub report_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            training_path: PathBuf::from("data/TrainingRatings.txt"),
            testing_path: PathBuf::from("data/TestingRatings.txt"),
            report_path: PathBuf::from("result.txt"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

pub struct ReportSettings {
    /// Round predictions to the nearest integer before computing errors
    pub round_predictions: bool,
    /// Maximum number of decimals printed for a score
    pub precision: usize,
    pub format: ReportFormat,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            round_predictions: false,
            precision: 3,
            format: ReportFormat::Text,
        }
    }
}

pub struct AppConfig {
    pub prediction: PredictionSettings,
    pub data: DataSettings,
    pub report: ReportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            prediction: PredictionSettings::default(),
            data: DataSettings::default(),
            report: ReportSettings::default(),
        }
    }
}
