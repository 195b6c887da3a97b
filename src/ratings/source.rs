use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::parser::parse_records;
use super::store::{load_testing, load_training, TestingData, TrainingData, UserIndex};
use crate::domain::RatingRecord;
use crate::errors::{load_context, parse_context, with_load_context};

/// Reads all rating records from a comma-separated file
pub fn read_records(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = with_load_context(File::open(path), path)?;
    let records = parse_records(BufReader::new(file)).with_context(|| load_context(path))?;

    info!("Read {} rating records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_training_file(path: &Path) -> Result<TrainingData> {
    let records = read_records(path)?;
    Ok(load_training(records))
}

pub fn load_testing_file(path: &Path, index: &UserIndex) -> Result<TestingData> {
    let records = read_records(path)?;
    Ok(load_testing(records, index))
}

/// Parses ratings held in memory, e.g. an embedded fixture
pub fn records_from_str(source: &str, name: &str) -> Result<Vec<RatingRecord>> {
    parse_records(source.as_bytes()).with_context(|| parse_context(name))
}
