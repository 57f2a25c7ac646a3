//! Vectorized generation of arithmetic sequences over columnar batches.
//!
//! For each selected row of a batch, `sequence(start, stop[, step])` produces the
//! list `start, start + step, ..., stop` (inclusive, as far as the step reaches).
//! Three element domains are supported:
//!
//! - **Integer** (`Int64`): the step is a plain integer.
//! - **Date** (`Date32`): the step is a day-to-second interval that must amount to
//!   whole days.
//! - **Timestamp** (`Timestamp(Millisecond)`): the step is a day-to-second interval.
//!
//! Without an explicit step, integers and dates count by one towards `stop`.
//!
//! # Core Concepts
//!
//! ## Ordinals
//!
//! Every domain maps its values onto a signed 64-bit ordinal (the integer itself,
//! days, or milliseconds). Step inference, validation and length computation are
//! written once against ordinals; see [`domain::ElementDomain`].
//!
//! ## Batch layout
//!
//! The kernel writes all generated elements of a batch into a single buffer sized
//! up front. Each row owns the slice `[offset, offset + size)` of that buffer, which
//! maps directly onto an Arrow `ListView` array; see [`output::SequenceBatch`].
//!
//! ## Row failures
//!
//! Zero steps, steps pointing away from `stop`, non-day steps for dates and
//! sequences longer than [`MAX_RESULT_ENTRIES`] fail only the affected row. The
//! failures are collected in a [`report::RowErrors`] report, and
//! [`options::RowErrorPolicy`] decides whether the caller receives a partial result
//! or an error.
//!
//! # Main Components
//!
//! - [`kernel::SequenceKernel`]: the two-pass (size, then fill) batch algorithm.
//! - [`args::SequenceArgs`]: decoded start/stop/step columns.
//! - [`selection::SelectionVector`]: rows of the batch to evaluate.
//! - [`function::SequenceFunction`]: signature resolution and type-erased dispatch.

pub mod args;
pub mod domain;
pub mod fill;
pub mod function;
pub mod kernel;
pub mod options;
pub mod output;
pub mod report;
pub mod selection;
pub mod signature;
pub mod sizing;
pub mod step;

#[cfg(test)]
mod tests;

/// Maximum number of elements of a single generated sequence.
pub const MAX_RESULT_ENTRIES: usize = 10_000;

/// Milliseconds in one day, the unit of date steps.
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub use args::SequenceArgs;
pub use domain::{DateDomain, DomainKind, ElementDomain, IntegerDomain, TimestampDomain};
pub use function::{SequenceFunction, SequenceOutput, resolve};
pub use kernel::SequenceKernel;
pub use options::{RowErrorPolicy, SequenceOptions};
pub use output::SequenceBatch;
pub use report::{RowErrors, SequenceError};
pub use selection::SelectionVector;
