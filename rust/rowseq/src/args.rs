//! Row-addressable views over the argument columns of a sequence invocation.
//!
//! Arguments arrive as Arrow [`Datum`]s: either arrays spanning the whole batch,
//! or scalars and length-1 arrays that apply to every row. Both
//! are exposed through [`DecodedColumn`], so the kernel reads `value_at(row)`
//! without caring about the physical shape.

use arrow_array::{
    Array, ArrowPrimitiveType, Datum, PrimitiveArray,
    cast::AsArray,
    types::{DurationMillisecondType, Int64Type, IntervalDayTimeType},
};
use arrow_schema::{DataType, IntervalUnit, TimeUnit};
use rowseq_common::{Result, error::Error};

use crate::{
    MILLIS_PER_DAY,
    domain::{DomainKind, ElementDomain, Native},
};

/// A decoded primitive column.
#[derive(Debug)]
pub enum DecodedColumn<T: ArrowPrimitiveType> {
    /// One value slot per batch row.
    Flat(PrimitiveArray<T>),
    /// A single value (or null) shared by all rows.
    Constant(Option<T::Native>),
}

impl<T: ArrowPrimitiveType> Clone for DecodedColumn<T> {
    fn clone(&self) -> Self {
        match self {
            DecodedColumn::Flat(values) => DecodedColumn::Flat(values.clone()),
            DecodedColumn::Constant(value) => DecodedColumn::Constant(*value),
        }
    }
}

impl<T: ArrowPrimitiveType> DecodedColumn<T> {
    /// Decodes `datum` as a column of `T` over a batch of `batch_len` rows.
    ///
    /// Scalars and length-1 arrays are broadcast to every row. `name` identifies
    /// the argument in error messages.
    pub fn try_new(name: &str, datum: &dyn Datum, batch_len: usize) -> Result<DecodedColumn<T>> {
        let (array, is_scalar) = datum.get();
        let Some(values) = array.as_primitive_opt::<T>() else {
            return Err(Error::invalid_arg(
                name,
                format!("unexpected type {}", array.data_type()),
            ));
        };
        if is_scalar || (values.len() == 1 && batch_len != 1) {
            if values.len() != 1 {
                return Err(Error::invalid_arg(
                    name,
                    format!("scalar must have one value, found {}", values.len()),
                ));
            }
            return Ok(Self::constant_of(values));
        }
        if values.len() != batch_len {
            return Err(Error::invalid_arg(
                name,
                format!(
                    "column has {} rows, batch has {batch_len} rows",
                    values.len()
                ),
            ));
        }
        Ok(DecodedColumn::Flat(values.clone()))
    }

    fn constant_of(values: &PrimitiveArray<T>) -> DecodedColumn<T> {
        if values.is_valid(0) {
            DecodedColumn::Constant(Some(values.value(0)))
        } else {
            DecodedColumn::Constant(None)
        }
    }

    /// Returns the value at `row`. The result is unspecified for null rows.
    #[inline]
    pub fn value_at(&self, row: usize) -> T::Native {
        match self {
            DecodedColumn::Flat(values) => values.value(row),
            DecodedColumn::Constant(value) => value.unwrap_or_default(),
        }
    }

    #[inline]
    pub fn is_null_at(&self, row: usize) -> bool {
        match self {
            DecodedColumn::Flat(values) => values.is_null(row),
            DecodedColumn::Constant(value) => value.is_none(),
        }
    }

}

/// A decoded step column, normalized to 64-bit ordinal (or millisecond) steps.
#[derive(Debug, Clone)]
pub enum StepColumn {
    /// Plain `bigint` steps.
    Int64(DecodedColumn<Int64Type>),
    /// Day-to-second interval expressed as a millisecond duration.
    Duration(DecodedColumn<DurationMillisecondType>),
    /// Day-to-second interval expressed as (days, milliseconds).
    DayTime(DecodedColumn<IntervalDayTimeType>),
}

impl StepColumn {
    /// Decodes the step argument for the given element domain.
    ///
    /// Integer sequences take `bigint` steps; date and timestamp sequences take
    /// a day-to-second interval, either `Duration(Millisecond)` or
    /// `Interval(DayTime)`.
    pub fn try_new(kind: DomainKind, datum: &dyn Datum, batch_len: usize) -> Result<StepColumn> {
        let data_type = datum.get().0.data_type().clone();
        match (kind, &data_type) {
            (DomainKind::Integer, DataType::Int64) => Ok(StepColumn::Int64(
                DecodedColumn::try_new("step", datum, batch_len)?,
            )),
            (
                DomainKind::Date | DomainKind::Timestamp,
                DataType::Duration(TimeUnit::Millisecond),
            ) => Ok(StepColumn::Duration(DecodedColumn::try_new(
                "step", datum, batch_len,
            )?)),
            (
                DomainKind::Date | DomainKind::Timestamp,
                DataType::Interval(IntervalUnit::DayTime),
            ) => Ok(StepColumn::DayTime(DecodedColumn::try_new(
                "step", datum, batch_len,
            )?)),
            _ => Err(Error::invalid_arg(
                "step",
                format!("type {data_type} is not a valid step for {kind} sequences"),
            )),
        }
    }

    /// Returns the raw step at `row`: a plain integer for `bigint` sequences,
    /// otherwise milliseconds.
    #[inline]
    pub fn value_at(&self, row: usize) -> i64 {
        match self {
            StepColumn::Int64(column) => column.value_at(row),
            StepColumn::Duration(column) => column.value_at(row),
            StepColumn::DayTime(column) => {
                let interval = column.value_at(row);
                interval.days as i64 * MILLIS_PER_DAY + interval.milliseconds as i64
            }
        }
    }

    #[inline]
    pub fn is_null_at(&self, row: usize) -> bool {
        match self {
            StepColumn::Int64(column) => column.is_null_at(row),
            StepColumn::Duration(column) => column.is_null_at(row),
            StepColumn::DayTime(column) => column.is_null_at(row),
        }
    }
}

/// The decoded `(start, stop, step?)` arguments of one batch.
#[derive(Debug)]
pub struct SequenceArgs<D: ElementDomain> {
    batch_len: usize,
    element_type: DataType,
    start: DecodedColumn<D::ArrowType>,
    stop: DecodedColumn<D::ArrowType>,
    step: Option<StepColumn>,
}

impl<D: ElementDomain> Clone for SequenceArgs<D> {
    fn clone(&self) -> Self {
        SequenceArgs {
            batch_len: self.batch_len,
            element_type: self.element_type.clone(),
            start: self.start.clone(),
            stop: self.stop.clone(),
            step: self.step.clone(),
        }
    }
}

impl<D: ElementDomain> SequenceArgs<D> {
    /// Decodes the arguments of a batch of `batch_len` rows.
    ///
    /// Start and stop must have the same type; it becomes the element type of
    /// the generated lists (timestamps keep their timezone annotation).
    pub fn try_new(
        batch_len: usize,
        start: &dyn Datum,
        stop: &dyn Datum,
        step: Option<&dyn Datum>,
    ) -> Result<SequenceArgs<D>> {
        let element_type = start.get().0.data_type().clone();
        let stop_type = stop.get().0.data_type();
        if stop_type != &element_type {
            return Err(Error::invalid_arg(
                "stop",
                format!("type {stop_type} does not match start type {element_type}"),
            ));
        }
        Ok(SequenceArgs {
            batch_len,
            start: DecodedColumn::try_new("start", start, batch_len)?,
            stop: DecodedColumn::try_new("stop", stop, batch_len)?,
            step: step
                .map(|step| StepColumn::try_new(D::KIND, step, batch_len))
                .transpose()?,
            element_type,
        })
    }

    /// Number of rows in the batch.
    #[inline]
    pub fn batch_len(&self) -> usize {
        self.batch_len
    }

    /// Arrow type of the start/stop values and of the generated elements.
    pub fn element_type(&self) -> &DataType {
        &self.element_type
    }

    #[inline]
    pub fn has_step(&self) -> bool {
        self.step.is_some()
    }

    #[inline]
    pub fn start_at(&self, row: usize) -> Native<D> {
        self.start.value_at(row)
    }

    #[inline]
    pub fn stop_at(&self, row: usize) -> Native<D> {
        self.stop.value_at(row)
    }

    /// The raw step at `row`, or `None` if the invocation has no step argument.
    #[inline]
    pub fn raw_step_at(&self, row: usize) -> Option<i64> {
        self.step.as_ref().map(|step| step.value_at(row))
    }

    /// Returns `true` if any argument is null at `row`.
    #[inline]
    pub fn has_null_at(&self, row: usize) -> bool {
        self.start.is_null_at(row)
            || self.stop.is_null_at(row)
            || self.step.as_ref().is_some_and(|step| step.is_null_at(row))
    }
}
