pub mod predictor;
pub mod types;

pub use predictor::PredictionEngine;
pub use types::{Prediction, PredictionSource};
