//! Resolution of the effective step, in ordinal units, for one row.

use crate::{MILLIS_PER_DAY, domain::DomainKind, report::SequenceError};

/// Returns the step to apply between consecutive elements, in ordinal units.
///
/// Without an explicit step the sequence counts by one towards `stop`.
/// An explicit step is taken as-is for integers and timestamps. For dates the step
/// is a day-to-second interval in milliseconds and must amount to whole days.
///
/// A zero result is not rejected here; see [`crate::sizing::sequence_count`].
#[inline]
pub fn infer_step(
    start: i64,
    stop: i64,
    raw_step: Option<i64>,
    kind: DomainKind,
) -> Result<i64, SequenceError> {
    let Some(step) = raw_step else {
        return Ok(if stop >= start { 1 } else { -1 });
    };
    if !kind.is_date() {
        return Ok(step);
    }
    if step % MILLIS_PER_DAY != 0 {
        return Err(SequenceError::InvalidDateStepUnit { step_millis: step });
    }
    Ok(step / MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_follows_direction() {
        assert_eq!(infer_step(1, 5, None, DomainKind::Integer), Ok(1));
        assert_eq!(infer_step(5, 1, None, DomainKind::Integer), Ok(-1));
        assert_eq!(infer_step(3, 3, None, DomainKind::Date), Ok(1));
        assert_eq!(infer_step(0, -10, None, DomainKind::Timestamp), Ok(-1));
    }

    #[test]
    fn test_explicit_step_passes_through() {
        assert_eq!(infer_step(1, 5, Some(2), DomainKind::Integer), Ok(2));
        assert_eq!(infer_step(1, 5, Some(0), DomainKind::Integer), Ok(0));
        assert_eq!(
            infer_step(0, 2000, Some(1000), DomainKind::Timestamp),
            Ok(1000)
        );
        // Direction is not checked here.
        assert_eq!(infer_step(1, 5, Some(-3), DomainKind::Integer), Ok(-3));
    }

    #[test]
    fn test_date_step_in_whole_days() {
        assert_eq!(
            infer_step(0, 10, Some(MILLIS_PER_DAY), DomainKind::Date),
            Ok(1)
        );
        assert_eq!(
            infer_step(10, 0, Some(-3 * MILLIS_PER_DAY), DomainKind::Date),
            Ok(-3)
        );
        assert_eq!(infer_step(0, 10, Some(0), DomainKind::Date), Ok(0));
    }

    #[test]
    fn test_date_step_partial_day() {
        let twelve_hours = MILLIS_PER_DAY / 2;
        assert_eq!(
            infer_step(0, 1, Some(twelve_hours), DomainKind::Date),
            Err(SequenceError::InvalidDateStepUnit {
                step_millis: twelve_hours
            })
        );
        assert!(infer_step(0, 1, Some(-1), DomainKind::Date).is_err());
        // Timestamps accept any millisecond step.
        assert_eq!(
            infer_step(0, 1, Some(twelve_hours), DomainKind::Timestamp),
            Ok(twelve_hours)
        );
    }
}
