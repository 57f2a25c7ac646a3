//! The list-typed result of one sequence batch.
//!
//! All generated elements live in a single flat buffer. Each row describes its
//! slice of that buffer with an `(offset, size)` pair, which is the layout of an
//! Arrow `ListView` array. Rows that produced nothing (unselected rows, rows with
//! a null argument, rows that failed) have size 0, offset 0 and are null.

use std::sync::Arc;

use arrow_array::{LargeListArray, ListViewArray, PrimitiveArray};
use arrow_buffer::{NullBuffer, OffsetBuffer, ScalarBuffer};
use arrow_schema::{DataType, Field, FieldRef};
use rowseq_common::{Result, error::Error};

use crate::{
    domain::{ElementDomain, Native},
    report::RowErrors,
};

/// Generated sequences of one batch, plus the failures of the rows that could not
/// be generated.
#[derive(Debug, Clone)]
pub struct SequenceBatch<D: ElementDomain> {
    element_type: DataType,
    elements: Vec<Native<D>>,
    offsets: Vec<i32>,
    sizes: Vec<i32>,
    nulls: NullBuffer,
    errors: RowErrors,
}

impl<D: ElementDomain> SequenceBatch<D> {
    pub(crate) fn new(
        element_type: DataType,
        elements: Vec<Native<D>>,
        offsets: Vec<i32>,
        sizes: Vec<i32>,
        nulls: NullBuffer,
        errors: RowErrors,
    ) -> SequenceBatch<D> {
        assert_eq!(offsets.len(), sizes.len());
        assert_eq!(nulls.len(), sizes.len());
        SequenceBatch {
            element_type,
            elements,
            offsets,
            sizes,
            nulls,
            errors,
        }
    }

    /// Number of rows (list values), selected or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arrow type of the list elements.
    pub fn element_type(&self) -> &DataType {
        &self.element_type
    }

    /// The shared element buffer.
    pub fn elements(&self) -> &[Native<D>] {
        &self.elements
    }

    /// Start index of each row's slice in [`elements`](Self::elements).
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    /// Element count of each row's slice.
    pub fn sizes(&self) -> &[i32] {
        &self.sizes
    }

    /// Total number of generated elements across all rows.
    #[inline]
    pub fn total_elements(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if `row` holds a (possibly single-element) sequence.
    #[inline]
    pub fn is_valid(&self, row: usize) -> bool {
        self.nulls.is_valid(row)
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    /// Returns the sequence of `row`, or `None` if the row is null.
    pub fn row(&self, row: usize) -> Option<&[Native<D>]> {
        if !self.is_valid(row) {
            return None;
        }
        let start = self.offsets[row] as usize;
        let end = start + self.sizes[row] as usize;
        Some(&self.elements[start..end])
    }

    /// Failures of the rows that were selected but could not be generated.
    pub fn errors(&self) -> &RowErrors {
        &self.errors
    }

    /// The `List`/`ListView` item field for this batch.
    pub fn item_field(&self) -> FieldRef {
        Arc::new(Field::new("item", self.element_type.clone(), true))
    }

    /// Converts the batch into an Arrow `ListViewArray`, sharing the element
    /// buffer and the offset and size buffers as-is.
    pub fn into_list_view(self) -> Result<ListViewArray> {
        let field = self.item_field();
        let nulls = self.nulls_for_arrow();
        let values = Self::values_array(self.element_type, self.elements);
        ListViewArray::try_new(
            field,
            ScalarBuffer::from(self.offsets),
            ScalarBuffer::from(self.sizes),
            Arc::new(values),
            nulls,
        )
        .map_err(|e| Error::arrow("sequence list view", e))
    }

    /// Converts the batch into an Arrow `LargeListArray`.
    ///
    /// Non-empty slices are laid out contiguously in row order, so the list
    /// offsets are the running sum of the row sizes.
    pub fn into_large_list(self) -> Result<LargeListArray> {
        let field = self.item_field();
        let nulls = self.nulls_for_arrow();
        let offsets = OffsetBuffer::<i64>::from_lengths(self.sizes.iter().map(|&s| s as usize));
        let values = Self::values_array(self.element_type, self.elements);
        LargeListArray::try_new(field, offsets, Arc::new(values), nulls)
            .map_err(|e| Error::arrow("sequence large list", e))
    }

    fn nulls_for_arrow(&self) -> Option<NullBuffer> {
        (self.nulls.null_count() > 0).then(|| self.nulls.clone())
    }

    fn values_array(
        element_type: DataType,
        elements: Vec<Native<D>>,
    ) -> PrimitiveArray<D::ArrowType> {
        PrimitiveArray::<D::ArrowType>::new(ScalarBuffer::from(elements), None)
            .with_data_type(element_type)
    }
}

#[cfg(test)]
mod tests {
    use arrow_array::{Array, cast::AsArray, types::Int64Type};

    use super::*;
    use crate::{domain::IntegerDomain, report::SequenceError};

    fn sample() -> SequenceBatch<IntegerDomain> {
        // Rows: [1, 2, 3], null (failed), null (unselected), [7, 5].
        let mut errors = RowErrors::new();
        errors.push(1, SequenceError::ZeroStep);
        SequenceBatch::new(
            DataType::Int64,
            vec![1, 2, 3, 7, 5],
            vec![0, 0, 0, 3],
            vec![3, 0, 0, 2],
            NullBuffer::from(vec![true, false, false, true]),
            errors,
        )
    }

    #[test]
    fn test_row_access() {
        let batch = sample();
        assert_eq!(batch.len(), 4);
        assert_eq!(batch.total_elements(), 5);
        assert_eq!(batch.null_count(), 2);
        assert_eq!(batch.row(0), Some(&[1i64, 2, 3][..]));
        assert_eq!(batch.row(1), None);
        assert_eq!(batch.row(2), None);
        assert_eq!(batch.row(3), Some(&[7i64, 5][..]));
        assert_eq!(batch.errors().get(1), Some(SequenceError::ZeroStep));
    }

    #[test]
    fn test_into_list_view() {
        let list = sample().into_list_view().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.null_count(), 2);
        assert_eq!(list.value_offsets(), &[0, 0, 0, 3]);
        assert_eq!(list.value_sizes(), &[3, 0, 0, 2]);
        let row = list.value(3);
        assert_eq!(row.as_primitive::<Int64Type>().values().to_vec(), vec![7, 5]);
    }

    #[test]
    fn test_into_large_list() {
        let list = sample().into_large_list().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.value_offsets(), &[0, 3, 3, 3, 5]);
        assert!(list.is_null(1));
        let row = list.value(0);
        assert_eq!(row.as_primitive::<Int64Type>().values().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = SequenceBatch::<IntegerDomain>::new(
            DataType::Int64,
            vec![],
            vec![],
            vec![],
            NullBuffer::new_valid(0),
            RowErrors::new(),
        );
        assert!(batch.is_empty());
        let list = batch.into_list_view().unwrap();
        assert_eq!(list.len(), 0);
    }
}
