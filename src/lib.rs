pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod evaluation;
pub mod prediction;
pub mod ratings;
pub mod services;
pub mod similarity;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::cli::{Command, EvaluateArgs, PredictArgs};
use crate::config::settings::AppConfig;
use crate::services::evaluation::EvaluationService;
use crate::services::query::QueryService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_evaluate(args: &EvaluateArgs) -> Result<()> {
    let config = evaluate_config(args);
    let service = EvaluationService::new(config);
    let report = service.run()?;

    println!(
        "{} {:.4}\n{} {:.4}",
        "Mean Absolute Error:".bold(),
        report.metrics.mean_absolute_error,
        "Root Mean Squared Error:".bold(),
        report.metrics.root_mean_squared_error
    );
    Ok(())
}

pub fn handle_predict(args: &PredictArgs) -> Result<()> {
    let config = predict_config(args);
    let service = QueryService::new(config)?;
    let prediction = service.predict(args.user, args.item);

    let label = format!("user {} / item {}:", args.user, args.item);
    println!(
        "{} {:.3} ({})",
        label.as_str().bold(),
        prediction.score,
        prediction.source.as_str().dimmed()
    );
    Ok(())
}

fn evaluate_config(args: &EvaluateArgs) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(path) = &args.training {
        config.data.training_path = path.clone();
    }
    if let Some(path) = &args.testing {
        config.data.testing_path = path.clone();
    }
    if let Some(path) = &args.output {
        config.data.report_path = path.clone();
    }
    if let Some(fallback) = args.fallback {
        config.prediction.fallback_rating = fallback;
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    config.report.round_predictions = args.round;
    config
}

fn predict_config(args: &PredictArgs) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(path) = &args.training {
        config.data.training_path = path.clone();
    }
    if let Some(fallback) = args.fallback {
        config.prediction.fallback_rating = fallback;
    }
    config
}
