//! Batch assembly of sequences.
//!
//! [`SequenceKernel::apply`] runs two ordered passes over the selected rows:
//!
//! 1. **Sizing**: re-derives each row's ordinal start, stop and step from the
//!    argument columns, validates them and records the element count. A failing
//!    row is reported and keeps a zero size.
//! 2. **Fill**: allocates one element buffer of exactly the summed size, then
//!    assigns every non-empty row the next offset and writes its elements in place.
//!
//! Offsets depend on the sizes of all preceding rows, so no fill write happens
//! before the sizing pass is complete.

use std::marker::PhantomData;

use arrow_buffer::{BooleanBufferBuilder, NullBuffer};
use log::{debug, trace};
use rowseq_common::{Result, error::Error, verify_arg};

use crate::{
    args::SequenceArgs,
    domain::{ElementDomain, Native},
    fill::fill_sequence,
    output::SequenceBatch,
    report::{RowErrors, SequenceError},
    selection::SelectionVector,
    sizing::sequence_count,
    step::infer_step,
};

/// Sequence generator for the element domain `D`.
///
/// The kernel is stateless; one instance may serve any number of batches,
/// concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceKernel<D: ElementDomain> {
    _domain: PhantomData<D>,
}

impl<D: ElementDomain> SequenceKernel<D> {
    pub fn new() -> SequenceKernel<D> {
        SequenceKernel {
            _domain: PhantomData,
        }
    }

    /// Generates the sequences of the selected rows of a batch.
    ///
    /// The result spans every row of the batch. Unselected rows, rows with a null
    /// argument and rows that failed validation are null and own no elements;
    /// the failures are available through [`SequenceBatch::errors`].
    ///
    /// Fails only if the selection does not match the batch, or if the batch
    /// would hold more than `i32::MAX` elements in total.
    pub fn apply(
        &self,
        selection: &SelectionVector,
        args: &SequenceArgs<D>,
    ) -> Result<SequenceBatch<D>> {
        verify_arg!(selection, selection.len() == args.batch_len());

        let num_rows = selection.len();
        let mut sizes = vec![0i32; num_rows];
        let mut offsets = vec![0i32; num_rows];
        let mut validity = BooleanBufferBuilder::new(num_rows);
        validity.append_n(num_rows, false);
        let mut errors = RowErrors::new();

        let mut num_elements = 0usize;
        for row in selection.iter() {
            if args.has_null_at(row) {
                continue;
            }
            match Self::row_count(args, row) {
                Ok(count) => {
                    sizes[row] = count as i32;
                    num_elements += count;
                    validity.set_bit(row, true);
                }
                Err(e) => {
                    trace!("sequence row {row} failed: {e}");
                    errors.push(row, e);
                }
            }
        }

        if num_elements > i32::MAX as usize {
            return Err(Error::invalid_arg(
                "selection",
                format!("batch would generate {num_elements} elements, the limit is {}", i32::MAX),
            ));
        }

        let mut elements: Vec<Native<D>> = vec![Default::default(); num_elements];
        let mut elements_offset = 0usize;
        for row in selection.iter() {
            let count = sizes[row] as usize;
            if count == 0 {
                continue;
            }
            offsets[row] = elements_offset as i32;
            Self::write_row(
                &mut elements[elements_offset..elements_offset + count],
                args,
                row,
            );
            elements_offset += count;
        }
        debug_assert_eq!(elements_offset, num_elements);

        debug!(
            "{} sequence batch: {num_rows} rows, {} selected, {num_elements} elements, {} failed",
            D::KIND,
            selection.count_selected(),
            errors.len()
        );

        Ok(SequenceBatch::new(
            args.element_type().clone(),
            elements,
            offsets,
            sizes,
            NullBuffer::new(validity.finish()),
            errors,
        ))
    }

    /// Validates a row and returns the length of its sequence.
    fn row_count(args: &SequenceArgs<D>, row: usize) -> std::result::Result<usize, SequenceError> {
        let start = D::to_ordinal(args.start_at(row));
        let stop = D::to_ordinal(args.stop_at(row));
        let step = infer_step(start, stop, args.raw_step_at(row), D::KIND)?;
        sequence_count(start, stop, step)
    }

    /// Fills the slice of a row that passed [`Self::row_count`].
    fn write_row(dest: &mut [Native<D>], args: &SequenceArgs<D>, row: usize) {
        let start = args.start_at(row);
        let stop = args.stop_at(row);
        match infer_step(
            D::to_ordinal(start),
            D::to_ordinal(stop),
            args.raw_step_at(row),
            D::KIND,
        ) {
            Ok(step) => fill_sequence::<D>(dest, start, step),
            Err(e) => unreachable!("row {row} passed validation: {e}"),
        }
    }
}
