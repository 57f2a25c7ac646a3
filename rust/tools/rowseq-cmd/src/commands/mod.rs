//! Command implementations for rowseq-cmd

pub mod batch;
pub mod generate;
