use log::warn;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::domain::PredictionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub count: usize,
    pub mean_absolute_error: f64,
    pub root_mean_squared_error: f64,
}

/// MAE and RMSE over all outcomes. With `round_predictions`, scores are
/// rounded to the nearest integer before the error is taken.
pub fn compute_metrics(outcomes: &[PredictionOutcome], round_predictions: bool) -> ErrorMetrics {
    if outcomes.is_empty() {
        warn!("No predictions to evaluate");
        return ErrorMetrics {
            count: 0,
            mean_absolute_error: 0.0,
            root_mean_squared_error: 0.0,
        };
    }

    let errors: Array1<f64> = outcomes
        .iter()
        .map(|o| o.error(round_predictions))
        .collect();

    let mae = errors.mapv(f64::abs).mean().unwrap_or(0.0);
    let mse = errors.mapv(|e| e * e).mean().unwrap_or(0.0);

    ErrorMetrics {
        count: outcomes.len(),
        mean_absolute_error: mae,
        root_mean_squared_error: mse.sqrt(),
    }
}
