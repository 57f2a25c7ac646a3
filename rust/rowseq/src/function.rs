//! Type-erased entry point: resolves the argument types once, then runs the
//! matching [`SequenceKernel`] for every batch.

use std::sync::Arc;

use arrow_array::{ArrayRef, Datum};
use arrow_schema::{DataType, Field};
use rowseq_common::{Result, error::Error};

use crate::{
    args::SequenceArgs,
    domain::{DateDomain, DomainKind, ElementDomain, IntegerDomain, TimestampDomain},
    kernel::SequenceKernel,
    options::{RowErrorPolicy, SequenceOptions},
    report::RowErrors,
    selection::SelectionVector,
    signature::{SIGNATURES, SequenceSignature},
};

/// Result of one invocation: a `ListView` array with one list per batch row, and
/// the failures of rows that were selected but could not be generated.
#[derive(Debug, Clone)]
pub struct SequenceOutput {
    pub array: ArrayRef,
    pub errors: RowErrors,
}

/// `sequence` bound to concrete argument types.
#[derive(Debug, Clone)]
pub struct SequenceFunction {
    signature: SequenceSignature,
    element_type: DataType,
}

impl SequenceFunction {
    /// All registered forms of the function.
    pub fn signatures() -> &'static [SequenceSignature] {
        &SIGNATURES
    }

    /// Binds the function to the given argument types.
    pub fn resolve(arg_types: &[DataType]) -> Result<SequenceFunction> {
        let signature = SequenceSignature::resolve(arg_types)?;
        Ok(SequenceFunction {
            signature,
            element_type: arg_types[0].clone(),
        })
    }

    pub fn signature(&self) -> SequenceSignature {
        self.signature
    }

    pub fn domain(&self) -> DomainKind {
        self.signature.domain
    }

    /// The Arrow type of the produced arrays.
    pub fn return_type(&self) -> DataType {
        DataType::ListView(Arc::new(Field::new(
            "item",
            self.element_type.clone(),
            true,
        )))
    }

    /// Generates the sequences of the selected rows.
    ///
    /// `args` holds start, stop and (for three-argument forms) step, as arrays
    /// spanning `selection.len()` rows or as scalars. Under
    /// [`RowErrorPolicy::FailBatch`] the first failed row is returned as
    /// an error instead of a partial result.
    pub fn invoke(
        &self,
        selection: &SelectionVector,
        args: &[&dyn Datum],
        options: &SequenceOptions,
    ) -> Result<SequenceOutput> {
        if args.len() != self.signature.arity() {
            return Err(Error::invalid_arg(
                "arguments",
                format!(
                    "{} expects {} arguments, got {}",
                    self.signature,
                    self.signature.arity(),
                    args.len()
                ),
            ));
        }
        let start_type = args[0].get().0.data_type();
        if start_type != &self.element_type {
            return Err(Error::invalid_arg(
                "start",
                format!(
                    "type {start_type} does not match the resolved type {}",
                    self.element_type
                ),
            ));
        }
        match self.domain() {
            DomainKind::Integer => Self::run::<IntegerDomain>(selection, args, options),
            DomainKind::Date => Self::run::<DateDomain>(selection, args, options),
            DomainKind::Timestamp => Self::run::<TimestampDomain>(selection, args, options),
        }
    }

    /// Generates the sequences of every row of equally long argument arrays.
    pub fn invoke_all(
        &self,
        args: &[ArrayRef],
        options: &SequenceOptions,
    ) -> Result<SequenceOutput> {
        let num_rows = args.first().map_or(0, |array| array.len());
        let datums = args.iter().map(|array| array as &dyn Datum).collect::<Vec<_>>();
        self.invoke(&SelectionVector::all(num_rows), &datums, options)
    }

    fn run<D: ElementDomain>(
        selection: &SelectionVector,
        args: &[&dyn Datum],
        options: &SequenceOptions,
    ) -> Result<SequenceOutput> {
        let args =
            SequenceArgs::<D>::try_new(selection.len(), args[0], args[1], args.get(2).copied())?;
        let batch = SequenceKernel::<D>::new().apply(selection, &args)?;
        if options.row_errors() == RowErrorPolicy::FailBatch {
            if let Some((row, e)) = batch.errors().first() {
                return Err(Error::row(row, e));
            }
        }
        let errors = batch.errors().clone();
        Ok(SequenceOutput {
            array: Arc::new(batch.into_list_view()?),
            errors,
        })
    }
}

/// Shorthand for [`SequenceFunction::resolve`].
pub fn resolve(arg_types: &[DataType]) -> Result<SequenceFunction> {
    SequenceFunction::resolve(arg_types)
}
