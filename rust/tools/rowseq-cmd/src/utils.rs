//! Common utilities for rowseq-cmd

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use arrow_array::{
    Array, ArrayRef, Date32Array, DurationMillisecondArray, Int64Array,
    TimestampMillisecondArray, cast::AsArray,
};
use arrow_schema::{DataType, TimeUnit};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rowseq::{MILLIS_PER_DAY, RowErrors};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Element types accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ElementType {
    Bigint,
    Date,
    Timestamp,
}

impl ElementType {
    /// Arrow type of the start and stop columns.
    pub fn data_type(self) -> DataType {
        match self {
            ElementType::Bigint => DataType::Int64,
            ElementType::Date => DataType::Date32,
            ElementType::Timestamp => DataType::Timestamp(TimeUnit::Millisecond, None),
        }
    }

    /// Arrow type of the step column.
    pub fn step_type(self) -> DataType {
        match self {
            ElementType::Bigint => DataType::Int64,
            ElementType::Date | ElementType::Timestamp => {
                DataType::Duration(TimeUnit::Millisecond)
            }
        }
    }

    /// Parses start or stop values into an array of [`Self::data_type`]. Missing
    /// or empty values become nulls.
    pub fn parse_values<'a>(
        self,
        texts: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Result<ArrayRef> {
        let array: ArrayRef = match self {
            ElementType::Bigint => Arc::new(Int64Array::from(parse_all(texts, parse_bigint)?)),
            ElementType::Date => Arc::new(Date32Array::from(parse_all(texts, parse_date)?)),
            ElementType::Timestamp => Arc::new(TimestampMillisecondArray::from(parse_all(
                texts,
                parse_timestamp,
            )?)),
        };
        Ok(array)
    }

    /// Parses step values into an array of [`Self::step_type`].
    pub fn parse_steps<'a>(
        self,
        texts: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Result<ArrayRef> {
        let array: ArrayRef = match self {
            ElementType::Bigint => Arc::new(Int64Array::from(parse_all(texts, parse_bigint)?)),
            ElementType::Date | ElementType::Timestamp => Arc::new(
                DurationMillisecondArray::from(parse_all(texts, parse_interval_millis)?),
            ),
        };
        Ok(array)
    }
}

fn parse_all<'a, T>(
    texts: impl IntoIterator<Item = Option<&'a str>>,
    parse: fn(&str) -> Result<T>,
) -> Result<Vec<Option<T>>> {
    texts
        .into_iter()
        .map(|text| match text.map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some),
        })
        .collect()
}

pub fn parse_bigint(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .with_context(|| format!("Invalid integer: {text:?}"))
}

/// Parses a `YYYY-MM-DD` date into days since the Unix epoch.
pub fn parse_date(text: &str) -> Result<i32> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {text:?}"))?;
    Ok(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}

/// Parses `YYYY-MM-DD HH:MM:SS[.fff]` (or a bare date, meaning midnight) into
/// milliseconds since the Unix epoch.
pub fn parse_timestamp(text: &str) -> Result<i64> {
    let text = text.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(timestamp.and_utc().timestamp_millis());
        }
    }
    let days = parse_date(text)
        .with_context(|| format!("Invalid timestamp (expected YYYY-MM-DD HH:MM:SS): {text:?}"))?;
    Ok(days as i64 * MILLIS_PER_DAY)
}

/// Parses an interval such as `1d`, `-12h`, `30m`, `5s` or `250ms` into
/// milliseconds. A bare number is taken as milliseconds.
pub fn parse_interval_millis(text: &str) -> Result<i64> {
    let text = text.trim();
    let (amount, unit) = match text.find(|c: char| c.is_ascii_alphabetic()) {
        Some(pos) => text.split_at(pos),
        None => (text, "ms"),
    };
    let amount: i64 = amount
        .parse()
        .with_context(|| format!("Invalid interval: {text:?}"))?;
    let scale = match unit {
        "d" => MILLIS_PER_DAY,
        "h" => 60 * 60 * 1000,
        "m" => 60 * 1000,
        "s" => 1000,
        "ms" => 1,
        _ => bail!("Unknown interval unit {unit:?} in {text:?} (expected d, h, m, s or ms)"),
    };
    amount
        .checked_mul(scale)
        .with_context(|| format!("Interval out of range: {text:?}"))
}

/// Renders one line per row of a `ListView` result: the elements in brackets,
/// `NULL` for null or unselected rows, or the row's error.
pub fn format_rows(array: &dyn Array, errors: &RowErrors) -> Result<Vec<String>> {
    let list = array
        .as_list_view_opt::<i32>()
        .with_context(|| format!("Expected a list view array, got {}", array.data_type()))?;
    let options = FormatOptions::default();
    let mut lines = Vec::with_capacity(list.len());
    for row in 0..list.len() {
        if let Some(e) = errors.get(row) {
            lines.push(format!("ERROR: {e}"));
            continue;
        }
        if list.is_null(row) {
            lines.push("NULL".to_string());
            continue;
        }
        let values = list.value(row);
        let formatter = ArrayFormatter::try_new(values.as_ref(), &options)?;
        let items = (0..values.len())
            .map(|i| formatter.value(i).to_string())
            .collect::<Vec<_>>();
        lines.push(format!("[{}]", items.join(", ")));
    }
    Ok(lines)
}

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        bail!("Path is not a file: {}", path);
    }
    Ok(())
}
