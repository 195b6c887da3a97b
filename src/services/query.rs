use anyhow::Result;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::{ItemId, UserId};
use crate::prediction::{Prediction, PredictionEngine};
use crate::ratings::{self, TrainingData};
use crate::similarity::{CorrelationEngine, WeightMatrix};

/// Answers single (user, item) predictions against one training source
pub struct QueryService {
    config: AppConfig,
    training: TrainingData,
    weights: WeightMatrix,
}

impl QueryService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let training = ratings::load_training_file(&config.data.training_path)?;
        Ok(Self::from_training(config, training))
    }

    pub fn from_training(config: AppConfig, training: TrainingData) -> Self {
        let weights = CorrelationEngine::new().build(training.profiles());
        Self {
            config,
            training,
            weights,
        }
    }

    pub fn predict(&self, user_id: UserId, item_id: ItemId) -> Prediction {
        let engine = PredictionEngine::new(&self.training, &self.weights, &self.config.prediction);
        let prediction = engine.predict_for_user(user_id, item_id);
        info!(
            "Predicted {:.3} for user {} on item {} ({})",
            prediction.score,
            user_id,
            item_id,
            prediction.source.as_str()
        );
        prediction
    }

    pub fn training(&self) -> &TrainingData {
        &self.training
    }
}
