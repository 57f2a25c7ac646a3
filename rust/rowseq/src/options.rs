//! Host-facing configuration of a sequence invocation.

/// How row-level failures surface to the caller of
/// [`SequenceFunction::invoke`](crate::function::SequenceFunction::invoke).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowErrorPolicy {
    /// Failed rows become null and their errors are returned alongside the
    /// result (partial success).
    #[default]
    Collect,
    /// The first failed row, in row order, fails the whole invocation.
    FailBatch,
}

/// Options for a sequence invocation.
#[derive(Debug, Clone, Default)]
pub struct SequenceOptions {
    row_errors: RowErrorPolicy,
}

impl SequenceOptions {
    pub fn new() -> SequenceOptions {
        Default::default()
    }

    pub fn with_row_errors(mut self, policy: RowErrorPolicy) -> SequenceOptions {
        self.row_errors = policy;
        self
    }

    /// Shorthand for `with_row_errors(RowErrorPolicy::FailBatch)`.
    pub fn fail_fast(self) -> SequenceOptions {
        self.with_row_errors(RowErrorPolicy::FailBatch)
    }

    pub fn row_errors(&self) -> RowErrorPolicy {
        self.row_errors
    }
}
