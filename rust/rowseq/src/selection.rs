//! Set of rows within a batch that require processing.
//!
//! A `SelectionVector` models a set S ⊆ [0, len) where `len` is the batch size.
//! The batch size is part of the identity of the selection: it determines the
//! length of every output buffer, while only the selected rows are evaluated.

use std::ops::Range;

use arrow_buffer::{BooleanBuffer, BooleanBufferBuilder};

/// Rows of a batch selected for evaluation, backed by a bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionVector {
    bits: BooleanBuffer,
}

impl SelectionVector {
    /// Selects every row in [0, len).
    pub fn all(len: usize) -> SelectionVector {
        SelectionVector {
            bits: BooleanBuffer::new_set(len),
        }
    }

    /// Selects no rows; the batch still spans [0, len).
    pub fn none(len: usize) -> SelectionVector {
        SelectionVector {
            bits: BooleanBuffer::new_unset(len),
        }
    }

    /// Builds a selection from row positions. Positions ≥ `len` are ignored, as are
    /// duplicates.
    pub fn from_positions(
        len: usize,
        positions: impl IntoIterator<Item = usize>,
    ) -> SelectionVector {
        let mut builder = BooleanBufferBuilder::new(len);
        builder.append_n(len, false);
        for pos in positions {
            if pos < len {
                builder.set_bit(pos, true);
            }
        }
        SelectionVector {
            bits: builder.finish(),
        }
    }

    /// Builds a selection from half-open row ranges. Portions outside [0, len) are
    /// clipped and empty ranges are ignored.
    pub fn from_ranges(
        len: usize,
        ranges: impl IntoIterator<Item = Range<usize>>,
    ) -> SelectionVector {
        let mut builder = BooleanBufferBuilder::new(len);
        builder.append_n(len, false);
        for range in ranges {
            let end = range.end.min(len);
            for pos in range.start..end {
                builder.set_bit(pos, true);
            }
        }
        SelectionVector {
            bits: builder.finish(),
        }
    }

    /// Wraps a bitmap where a set bit marks a selected row.
    pub fn from_bitmap(bits: BooleanBuffer) -> SelectionVector {
        SelectionVector { bits }
    }

    /// Returns the batch size, i.e. the span of the selection.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if the batch has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of selected rows.
    #[inline]
    pub fn count_selected(&self) -> usize {
        self.bits.count_set_bits()
    }

    /// Returns `true` if `row` is selected.
    ///
    /// Panics if `row >= len()`.
    #[inline]
    pub fn contains(&self, row: usize) -> bool {
        self.bits.value(row)
    }

    #[inline]
    pub fn is_all_selected(&self) -> bool {
        self.count_selected() == self.len()
    }

    /// Iterates over the selected rows in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.set_indices()
    }
}
