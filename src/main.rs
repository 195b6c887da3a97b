use anyhow::Result;
use colored::Colorize;

use pearson_knn::cli::Command;
use pearson_knn::{handle_evaluate, handle_predict, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Evaluate(args) => handle_evaluate(args),
        Command::Predict(args) => handle_predict(args),
    }
}
