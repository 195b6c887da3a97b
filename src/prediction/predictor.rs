use log::debug;
use rayon::prelude::*;

use super::types::{Prediction, PredictionSource};
use crate::config::settings::PredictionSettings;
use crate::domain::{ItemId, RatingValue, UserId};
use crate::ratings::{TrainingData, UserProfile};
use crate::similarity::WeightMatrix;

/// Predicts ratings from the finished weight matrix and training profiles.
/// Holds only shared references, so one engine serves any number of
/// concurrent requests.
pub struct PredictionEngine<'a> {
    training: &'a TrainingData,
    weights: &'a WeightMatrix,
    fallback: RatingValue,
}

impl<'a> PredictionEngine<'a> {
    pub fn new(
        training: &'a TrainingData,
        weights: &'a WeightMatrix,
        settings: &PredictionSettings,
    ) -> Self {
        Self {
            training,
            weights,
            fallback: settings.fallback_rating,
        }
    }

    pub fn fallback(&self) -> RatingValue {
        self.fallback
    }

    /// Continuous score for `item_id`. `target` is the user's dense
    /// position, `None` for users absent from training.
    pub fn predict(&self, target: Option<usize>, item_id: ItemId) -> RatingValue {
        self.predict_detailed(target, item_id).score
    }

    pub fn predict_for_user(&self, user_id: UserId, item_id: ItemId) -> Prediction {
        let target = self.training.index().position(user_id);
        self.predict_detailed(target, item_id)
    }

    pub fn predict_detailed(&self, target: Option<usize>, item_id: ItemId) -> Prediction {
        let Some(position) = target else {
            return Prediction {
                score: self.fallback,
                source: PredictionSource::Fallback,
            };
        };

        match self.training.profile_at(position) {
            Some(profile) => self.aggregate(position, profile, item_id),
            None => {
                debug!("Position {} is outside the training population", position);
                Prediction {
                    score: self.fallback,
                    source: PredictionSource::Fallback,
                }
            }
        }
    }

    /// Predicts every request in parallel; output order matches input order
    pub fn predict_batch(&self, requests: &[(Option<usize>, ItemId)]) -> Vec<Prediction> {
        requests
            .par_iter()
            .map(|&(target, item_id)| self.predict_detailed(target, item_id))
            .collect()
    }

    fn aggregate(&self, position: usize, target: &UserProfile, item_id: ItemId) -> Prediction {
        let mut weighted_sum = 0.0;
        let mut normalizer = 0.0;
        let mut neighbors = 0;

        for (p, neighbor) in self.training.profiles().iter().enumerate() {
            if p == position {
                continue;
            }
            let Some(rating) = neighbor.rating_for(item_id) else {
                continue;
            };
            let w = self.weights.weight(position, p);
            if w == 0.0 {
                continue;
            }

            normalizer += w.abs();
            weighted_sum += w * (rating - neighbor.mean_rating());
            neighbors += 1;
        }

        if normalizer > 0.0 {
            Prediction {
                score: target.mean_rating() + weighted_sum / normalizer,
                source: PredictionSource::Neighbors { count: neighbors },
            }
        } else {
            Prediction {
                score: target.mean_rating(),
                source: PredictionSource::UserMean,
            }
        }
    }
}
