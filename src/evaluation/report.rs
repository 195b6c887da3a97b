use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use super::metrics::ErrorMetrics;
use crate::config::settings::{ReportFormat, ReportSettings};
use crate::domain::PredictionOutcome;
use crate::errors::report_context;
use crate::ratings::StoreSummary;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub elapsed_secs: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub generated_at: DateTime<Utc>,
    pub training: StoreSummary,
    pub testing_users: usize,
    pub unknown_users: usize,
    pub round_predictions: bool,
    pub stages: Vec<StageTiming>,
    /// Ordered by user id, then item id
    pub outcomes: Vec<PredictionOutcome>,
    pub metrics: ErrorMetrics,
}

impl EvaluationReport {
    pub fn render(&self, settings: &ReportSettings) -> Result<String> {
        match settings.format {
            ReportFormat::Text => Ok(self.render_text(settings.precision)),
            ReportFormat::Json => {
                serde_json::to_string_pretty(self).context("Failed to serialize report")
            }
        }
    }

    pub fn render_text(&self, precision: usize) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Generated at: {}", self.generated_at.to_rfc3339());
        let _ = writeln!(
            out,
            "Training: {} users, {} ratings, {} items",
            self.training.users, self.training.ratings, self.training.distinct_items
        );
        let _ = writeln!(
            out,
            "Testing: {} users ({} unknown), {} ratings",
            self.testing_users,
            self.unknown_users,
            self.outcomes.len()
        );

        for stage in &self.stages {
            let _ = writeln!(out, "Time(s):{:.3} {}", stage.elapsed_secs, stage.message);
        }

        let mut current_user = None;
        for outcome in &self.outcomes {
            if current_user != Some(outcome.user_id) {
                let _ = writeln!(out, "User:{}", outcome.user_id);
                current_user = Some(outcome.user_id);
            }
            let _ = writeln!(
                out,
                "\tMovie:{}=>{}({})",
                outcome.item_id,
                format_score(outcome.predicted, precision),
                format_score(outcome.actual, precision)
            );
        }

        let _ = writeln!(out, "\n\nMean Absolute Error: {}", self.metrics.mean_absolute_error);
        let _ = writeln!(out, "Root Mean Squared Error: {}", self.metrics.root_mean_squared_error);
        if self.round_predictions {
            let _ = writeln!(out, "(predictions rounded to the nearest integer)");
        }

        out
    }

    pub fn save(&self, path: &Path, settings: &ReportSettings) -> Result<()> {
        let content = self.render(settings)?;
        fs::write(path, content).with_context(|| report_context(path))?;

        info!("Saved report to {}", path.display());
        Ok(())
    }
}

/// Formats with at most `precision` decimals, dropping trailing zeros
pub fn format_score(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value);
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> EvaluationReport {
        EvaluationReport {
            generated_at: Utc::now(),
            training: StoreSummary {
                users: 2,
                ratings: 4,
                distinct_items: 2,
            },
            testing_users: 2,
            unknown_users: 1,
            round_predictions: false,
            stages: vec![StageTiming {
                elapsed_secs: 0.5,
                message: "Finished parsing training data.".to_string(),
            }],
            outcomes: vec![
                PredictionOutcome {
                    user_id: 7,
                    item_id: 1,
                    predicted: 3.25,
                    actual: 4.0,
                },
                PredictionOutcome {
                    user_id: 7,
                    item_id: 2,
                    predicted: 3.0,
                    actual: 3.0,
                },
                PredictionOutcome {
                    user_id: 9,
                    item_id: 1,
                    predicted: 3.0,
                    actual: 5.0,
                },
            ],
            metrics: ErrorMetrics {
                count: 3,
                mean_absolute_error: 0.9166,
                root_mean_squared_error: 1.2,
            },
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(3.0, 3), "3");
        assert_eq!(format_score(3.5, 3), "3.5");
        assert_eq!(format_score(3.14159, 3), "3.142");
        assert_eq!(format_score(-0.0001, 3), "0");
        assert_eq!(format_score(4.0, 0), "4");
    }

    #[test]
    fn test_render_text_groups_by_user() {
        let text = report().render_text(3);

        assert!(text.contains("Time(s):0.500 Finished parsing training data."));
        assert!(text.contains("User:7\n\tMovie:1=>3.25(4)\n\tMovie:2=>3(3)\n"));
        assert!(text.contains("User:9\n\tMovie:1=>3(5)\n"));
        assert_eq!(text.matches("User:7").count(), 1);
        assert!(text.contains("Mean Absolute Error: 0.9166"));
        assert!(text.contains("Root Mean Squared Error: 1.2"));
    }

    #[test]
    fn test_render_json() {
        let settings = ReportSettings {
            format: ReportFormat::Json,
            ..ReportSettings::default()
        };

        let json = report().render(&settings).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["unknown_users"], 1);
        assert_eq!(value["outcomes"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["metrics"]["count"], 3);
    }

    #[test]
    fn test_save_writes_file() {
        let path = std::env::temp_dir().join("pearson_knn_report_test.txt");

        report().save(&path, &ReportSettings::default()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Generated at:"));
        fs::remove_file(&path).unwrap();
    }
}
