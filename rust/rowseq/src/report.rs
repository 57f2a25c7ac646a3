//! Per-row failures of a sequence batch.

use thiserror::Error;

/// A user-input error attributed to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("step must not be zero")]
    ZeroStep,

    #[error(
        "sequence stop value should be greater than or equal to start value if step is \
         greater than zero otherwise stop should be less than or equal to start"
    )]
    DirectionMismatch,

    #[error(
        "result of sequence function must not have more than 10000 entries \
         (requested {count})"
    )]
    ResultTooLarge { count: i128 },

    #[error(
        "sequence step must be a day interval if start and end values are dates \
         (step: {step_millis} ms)"
    )]
    InvalidDateStepUnit { step_millis: i64 },
}

/// Row failures collected over one batch, in ascending row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowErrors {
    entries: Vec<(usize, SequenceError)>,
}

impl RowErrors {
    pub fn new() -> RowErrors {
        Default::default()
    }

    /// Records a failure for `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not follow the last recorded row.
    pub fn push(&mut self, row: usize, error: SequenceError) {
        if let Some(&(last, _)) = self.entries.last() {
            assert!(row > last, "row errors must be recorded in row order");
        }
        self.entries.push((row, error));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the failure recorded for `row`, if any.
    pub fn get(&self, row: usize) -> Option<SequenceError> {
        self.entries
            .binary_search_by_key(&row, |&(r, _)| r)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// The failure of the lowest-numbered failed row.
    pub fn first(&self) -> Option<(usize, SequenceError)> {
        self.entries.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, SequenceError)> + '_ {
        self.entries.iter().copied()
    }

    /// Row indices of the failed rows.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(row, _)| row)
    }
}

impl<'a> IntoIterator for &'a RowErrors {
    type Item = (usize, SequenceError);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (usize, SequenceError)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
