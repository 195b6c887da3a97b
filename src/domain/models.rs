use serde::{Deserialize, Serialize};

pub type UserId = i32;
pub type ItemId = i32;
pub type RatingValue = f64;

/// A single `itemId,userId,rating` line from a ratings source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub rating: RatingValue,
}

impl RatingRecord {
    pub fn new(item_id: ItemId, user_id: UserId, rating: RatingValue) -> Self {
        Self {
            item_id,
            user_id,
            rating,
        }
    }
}

/// Predicted vs. actual rating for one (user, item) pair of the testing source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub predicted: RatingValue,
    pub actual: RatingValue,
}

impl PredictionOutcome {
    pub fn error(&self, round_predictions: bool) -> f64 {
        let predicted = if round_predictions {
            self.predicted.round()
        } else {
            self.predicted
        };
        predicted - self.actual
    }
}
