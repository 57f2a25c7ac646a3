
use std::sync::Arc;

use arrow_array::{
    ArrayRef, Date32Array, DurationMillisecondArray, Int64Array, TimestampMillisecondArray,
};
use chrono::NaiveDate;

use crate::MILLIS_PER_DAY;

pub(crate) fn int64s(values: &[Option<i64>]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

/// Days since the epoch of the given calendar date.
pub(crate) fn days(year: i32, month: u32, day: u32) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    date.signed_duration_since(epoch).num_days() as i32
}

/// Milliseconds since the epoch of the given UTC date and time.
pub(crate) fn millis(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

pub(crate) fn dates(values: &[i32]) -> ArrayRef {
    Arc::new(Date32Array::from(values.to_vec()))
}

pub(crate) fn timestamps(values: &[i64]) -> ArrayRef {
    Arc::new(TimestampMillisecondArray::from(values.to_vec()))
}

pub(crate) fn durations(values: &[i64]) -> ArrayRef {
    Arc::new(DurationMillisecondArray::from(values.to_vec()))
}

pub(crate) fn day_steps(values: &[i64]) -> ArrayRef {
    durations(&values.iter().map(|d| d * MILLIS_PER_DAY).collect::<Vec<_>>())
}
