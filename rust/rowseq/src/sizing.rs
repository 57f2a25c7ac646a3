//! Validation of a row's sequence descriptor and computation of its length.

use crate::{MAX_RESULT_ENTRIES, report::SequenceError};

/// Validates `(start, stop, step)` and returns the number of elements of the
/// sequence, which is at least one.
///
/// The length is computed as `(stop - start) / step + 1` in 128-bit arithmetic:
/// `stop - start` alone can span the full 64-bit range.
#[inline]
pub fn sequence_count(start: i64, stop: i64, step: i64) -> Result<usize, SequenceError> {
    if step == 0 {
        return Err(SequenceError::ZeroStep);
    }
    let in_direction = if step > 0 { stop >= start } else { stop <= start };
    if !in_direction {
        return Err(SequenceError::DirectionMismatch);
    }
    let count = (stop as i128 - start as i128) / step as i128 + 1;
    if count > MAX_RESULT_ENTRIES as i128 {
        return Err(SequenceError::ResultTooLarge { count });
    }
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_counts() {
        assert_eq!(sequence_count(1, 5, 1), Ok(5));
        assert_eq!(sequence_count(5, 1, -2), Ok(3));
        assert_eq!(sequence_count(1, 10, 3), Ok(4));
        assert_eq!(sequence_count(1, 11, 3), Ok(4));
        assert_eq!(sequence_count(-5, 5, 5), Ok(3));
    }

    #[test]
    fn test_single_element() {
        assert_eq!(sequence_count(7, 7, 1), Ok(1));
        assert_eq!(sequence_count(7, 7, -1), Ok(1));
        assert_eq!(sequence_count(7, 7, i64::MAX), Ok(1));
        assert_eq!(sequence_count(7, 7, i64::MIN), Ok(1));
    }

    #[test]
    fn test_zero_step() {
        assert_eq!(sequence_count(1, 5, 0), Err(SequenceError::ZeroStep));
        assert_eq!(sequence_count(5, 5, 0), Err(SequenceError::ZeroStep));
    }

    #[test]
    fn test_direction_mismatch() {
        assert_eq!(
            sequence_count(1, 10, -1),
            Err(SequenceError::DirectionMismatch)
        );
        assert_eq!(
            sequence_count(10, 1, 1),
            Err(SequenceError::DirectionMismatch)
        );
    }

    #[test]
    fn test_max_entries_boundary() {
        assert_eq!(sequence_count(1, 10_000, 1), Ok(10_000));
        assert_eq!(
            sequence_count(1, 10_001, 1),
            Err(SequenceError::ResultTooLarge { count: 10_001 })
        );
        assert_eq!(sequence_count(0, -9_999, -1), Ok(10_000));
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        assert_eq!(
            sequence_count(i64::MIN, i64::MAX, 1),
            Err(SequenceError::ResultTooLarge {
                count: u64::MAX as i128 + 1
            })
        );
        assert_eq!(sequence_count(i64::MIN, i64::MAX, i64::MAX), Ok(3));
        assert_eq!(sequence_count(i64::MAX, i64::MIN, i64::MIN), Ok(2));
        assert_eq!(sequence_count(i64::MIN, i64::MIN, -1), Ok(1));
    }
}
