use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::config::settings::AppConfig;
use crate::domain::{ItemId, PredictionOutcome};
use crate::evaluation::{compute_metrics, EvaluationReport, StageTiming};
use crate::prediction::PredictionEngine;
use crate::ratings::{self, TestingData, TrainingData};
use crate::similarity::CorrelationEngine;

/// Trains on one ratings source, predicts every rating of another and
/// reports the prediction error.
pub struct EvaluationService {
    config: AppConfig,
}

impl EvaluationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<EvaluationReport> {
        info!("=== Starting Evaluation ===\n");
        let mut stopwatch = Stopwatch::start();

        let training = ratings::load_training_file(&self.config.data.training_path)?;
        let summary = training.store().summary();
        info!(
            "  → {} training users, {} ratings, {} items",
            summary.users, summary.ratings, summary.distinct_items
        );
        stopwatch.lap("Finished parsing training data.");

        let testing = ratings::load_testing_file(&self.config.data.testing_path, training.index())?;
        info!(
            "  → {} testing users ({} unknown to training), {} ratings",
            testing.len(),
            testing.unknown_users(),
            testing.rating_count()
        );
        stopwatch.lap("Finished parsing testing data.");

        let report = self.evaluate_with(&training, &testing, stopwatch);
        report.save(&self.config.data.report_path, &self.config.report)?;

        info!(
            "Mean Absolute Error: {:.4}, Root Mean Squared Error: {:.4}",
            report.metrics.mean_absolute_error, report.metrics.root_mean_squared_error
        );
        info!("=== Evaluation Complete ===");
        Ok(report)
    }

    /// Evaluates already-loaded data without touching the filesystem
    pub fn evaluate(&self, training: &TrainingData, testing: &TestingData) -> EvaluationReport {
        self.evaluate_with(training, testing, Stopwatch::start())
    }

    fn evaluate_with(
        &self,
        training: &TrainingData,
        testing: &TestingData,
        mut stopwatch: Stopwatch,
    ) -> EvaluationReport {
        let weights = CorrelationEngine::new().build(training.profiles());
        stopwatch.lap("Finished Matrix Calculation.");

        let engine = PredictionEngine::new(training, &weights, &self.config.prediction);
        let outcomes = self.predict_all(&engine, testing);
        stopwatch.lap("Finished predictions.");

        let metrics = compute_metrics(&outcomes, self.config.report.round_predictions);

        EvaluationReport {
            generated_at: Utc::now(),
            training: training.store().summary(),
            testing_users: testing.len(),
            unknown_users: testing.unknown_users(),
            round_predictions: self.config.report.round_predictions,
            stages: stopwatch.into_stages(),
            outcomes,
            metrics,
        }
    }

    fn predict_all(&self, engine: &PredictionEngine<'_>, testing: &TestingData) -> Vec<PredictionOutcome> {
        let requests: Vec<(Option<usize>, ItemId)> = testing
            .users()
            .iter()
            .flat_map(|user| user.profile.items().iter().map(move |&item| (user.position, item)))
            .collect();
        info!("Predicting {} ratings", requests.len());

        let predictions = engine.predict_batch(&requests);

        testing
            .users()
            .iter()
            .flat_map(|user| {
                let profile = &user.profile;
                profile
                    .items()
                    .iter()
                    .zip(profile.ratings())
                    .map(move |(&item_id, &actual)| (profile.user_id(), item_id, actual))
            })
            .zip(predictions)
            .map(|((user_id, item_id, actual), prediction)| PredictionOutcome {
                user_id,
                item_id,
                predicted: prediction.score,
                actual,
            })
            .collect()
    }
}

struct Stopwatch {
    started: Instant,
    stages: Vec<StageTiming>,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            started: Instant::now(),
            stages: Vec::new(),
        }
    }

    fn lap(&mut self, message: &str) {
        let elapsed_secs = self.started.elapsed().as_secs_f64();
        info!("Time(s):{:.3} {}", elapsed_secs, message);
        self.stages.push(StageTiming {
            elapsed_secs,
            message: message.to_string(),
        });
    }

    fn into_stages(self) -> Vec<StageTiming> {
        self.stages
    }
}
