//! Batch command implementation

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use arrow::util::pretty::print_batches;
use arrow_array::{ArrayRef, RecordBatch, StringArray, UInt64Array, cast::AsArray};
use arrow_csv::{ReaderBuilder, reader::Format};
use arrow_schema::{DataType, Field, Schema};
use log::{debug, info};
use rowseq::{SequenceFunction, SequenceOptions};
use rowseq_common::error::{Error, ErrorKind};

use crate::utils::{self, ElementType, format_rows};

pub fn run(file: String, element_type: ElementType, fail_fast: bool) -> Result<()> {
    utils::validate_file_exists(&file)?;
    let lines = generate_file(&file, element_type, fail_fast)?;
    let num_rows = lines.len() as u64;
    let output = RecordBatch::try_from_iter([
        ("row", Arc::new(UInt64Array::from_iter_values(0..num_rows)) as ArrayRef),
        ("sequence", Arc::new(StringArray::from(lines)) as ArrayRef),
    ])?;
    print_batches(&[output])?;
    Ok(())
}

/// Generates one sequence per CSV row, returning one rendered line per row.
///
/// The file must have a header and two (start, stop) or three (start, stop,
/// step) columns. Empty cells are nulls.
pub fn generate_file(
    path: &str,
    element_type: ElementType,
    fail_fast: bool,
) -> Result<Vec<String>> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open CSV file: {}", path))?;
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(1))
        .with_context(|| format!("Failed to read CSV header: {}", path))?;
    let num_columns = header.fields().len();
    if !(2..=3).contains(&num_columns) {
        bail!("Expected 2 or 3 columns (start, stop[, step]), found {num_columns} in {path}");
    }
    file.seek(SeekFrom::Start(0))?;

    // Read every cell as text; values are parsed per element type below.
    let csv_schema = Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );
    let reader = ReaderBuilder::new(Arc::new(csv_schema))
        .with_header(true)
        .build(file)
        .with_context(|| format!("Failed to create CSV reader for file: {}", path))?;

    let mut arg_types = vec![element_type.data_type(), element_type.data_type()];
    if num_columns == 3 {
        arg_types.push(element_type.step_type());
    }
    let function = SequenceFunction::resolve(&arg_types)
        .with_context(|| format!("No sequence form accepts {arg_types:?}"))?;
    info!("Generating {} for {}", function.signature(), path);

    let options = if fail_fast {
        SequenceOptions::new().fail_fast()
    } else {
        SequenceOptions::new()
    };

    let mut lines = Vec::new();
    for batch in reader {
        let batch = batch.with_context(|| format!("Failed to read CSV batch from {}", path))?;
        let first_row = lines.len();
        lines.extend(
            generate_batch(&function, element_type, &batch, first_row, &options)
                .with_context(|| format!("Failed to generate batch starting at row {first_row}"))?,
        );
        debug!("Generated rows {first_row}..{}", lines.len());
    }
    Ok(lines)
}

fn generate_batch(
    function: &SequenceFunction,
    element_type: ElementType,
    batch: &RecordBatch,
    first_row: usize,
    options: &SequenceOptions,
) -> Result<Vec<String>> {
    let mut args = Vec::with_capacity(batch.num_columns());
    for (i, column) in batch.columns().iter().enumerate() {
        let texts = column.as_string::<i32>().iter();
        let arg = if i < 2 {
            element_type.parse_values(texts)?
        } else {
            element_type.parse_steps(texts)?
        };
        args.push(arg);
    }
    // Row errors are numbered within the batch; report them by file row.
    let output = function
        .invoke_all(&args, options)
        .map_err(|e| match e.into_kind() {
            ErrorKind::Row { row, source } => anyhow!("row {}: {source}", first_row + row),
            kind => anyhow::Error::new(Error::from(kind)),
        })?;
    format_rows(output.array.as_ref(), &output.errors)
}
