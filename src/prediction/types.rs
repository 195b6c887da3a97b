use serde::{Deserialize, Serialize};

use crate::domain::RatingValue;

/// Which policy produced a predicted score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionSource {
    /// Weighted deviations of informative neighbors
    Neighbors { count: usize },
    /// Known user, but no neighbor with a nonzero weight rated the item
    UserMean,
    /// User never seen in training
    Fallback,
}

impl PredictionSource {
    pub fn as_str(&self) -> &str {
        match self {
            PredictionSource::Neighbors { .. } => "neighbors",
            PredictionSource::UserMean => "user_mean",
            PredictionSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub score: RatingValue,
    pub source: PredictionSource,
}
