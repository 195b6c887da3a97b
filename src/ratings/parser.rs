use std::io::BufRead;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::domain::RatingRecord;
use crate::errors::ParseError;

const FIELD_COUNT: usize = 3;

/// Parses one `itemId,userId,rating` line. `line_number` is 1-based.
pub fn parse_line(line: &str, line_number: usize) -> Result<RatingRecord, ParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            line: line_number,
            found: fields.len(),
            content: line.to_string(),
        });
    }

    let item_id = parse_field(fields[0], "item id", line_number)?;
    let user_id = parse_field(fields[1], "user id", line_number)?;
    let rating: f64 = parse_field(fields[2], "rating", line_number)?;

    if !rating.is_finite() {
        return Err(invalid(fields[2], "rating", line_number));
    }

    Ok(RatingRecord::new(item_id, user_id, rating))
}

/// Reads every record of a line-oriented source, skipping blank lines.
/// The first malformed line aborts the read.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<RatingRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(&line, line_number)?);
    }

    Ok(records)
}

fn parse_field<T: FromStr>(value: &str, field: &'static str, line: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| invalid(value, field, line))
}

fn invalid(value: &str, field: &'static str, line: usize) -> ParseError {
    ParseError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    }
}
