use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::settings::ReportFormat;
use crate::domain::{ItemId, UserId};

#[derive(Parser, Debug)]
#[command(author, version, about = "user-based Pearson k-NN rating prediction")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Train on one ratings file, predict every rating of another and write an error report
    Evaluate(EvaluateArgs),
    /// Predict a single user's rating for a single item
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// Training ratings (itemId,userId,rating per line)
    #[arg(long)]
    pub training: Option<PathBuf>,
    /// Testing ratings (itemId,userId,rating per line)
    #[arg(long)]
    pub testing: Option<PathBuf>,
    /// Report output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Score predicted for users absent from the training data
    #[arg(long)]
    pub fallback: Option<f64>,
    /// Round predictions to the nearest integer before computing errors
    #[arg(long)]
    pub round: bool,
    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    /// User id
    #[arg(short, long)]
    pub user: UserId,
    /// Item id
    #[arg(short, long)]
    pub item: ItemId,
    /// Training ratings (itemId,userId,rating per line)
    #[arg(long)]
    pub training: Option<PathBuf>,
    /// Score predicted for users absent from the training data
    #[arg(long)]
    pub fallback: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from([
            "pearson_knn",
            "evaluate",
            "--training",
            "train.txt",
            "--round",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::Evaluate(args) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.training, Some(PathBuf::from("train.txt")));
        assert_eq!(args.testing, None);
        assert!(args.round);
        assert_eq!(args.format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from(["pearson_knn", "predict", "-u", "7", "-i", "42"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Predict(PredictArgs {
                user: 7,
                item: 42,
                training: None,
                fallback: None,
            })
        );
    }

    #[test]
    fn test_predict_requires_user_and_item() {
        assert!(Cli::try_parse_from(["pearson_knn", "predict", "-u", "7"]).is_err());
    }
}
