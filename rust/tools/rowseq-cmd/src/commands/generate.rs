//! Generate command implementation

use anyhow::{Context, Result};
use log::debug;
use rowseq::SequenceOptions;

use crate::utils::{ElementType, format_rows};

pub fn run(
    element_type: ElementType,
    start: String,
    stop: String,
    step: Option<String>,
) -> Result<()> {
    let line = generate_line(element_type, &start, &stop, step.as_deref())?;
    println!("{line}");
    Ok(())
}

/// Generates one sequence and renders it as a bracketed list.
pub fn generate_line(
    element_type: ElementType,
    start: &str,
    stop: &str,
    step: Option<&str>,
) -> Result<String> {
    let mut args = vec![
        element_type.parse_values([Some(start)])?,
        element_type.parse_values([Some(stop)])?,
    ];
    if let Some(step) = step {
        args.push(element_type.parse_steps([Some(step)])?);
    }
    let arg_types = args
        .iter()
        .map(|arg| arg.data_type().clone())
        .collect::<Vec<_>>();
    let function = rowseq::resolve(&arg_types)
        .with_context(|| format!("No sequence form accepts {arg_types:?}"))?;
    debug!("Resolved {}", function.signature());

    let output = function
        .invoke_all(&args, &SequenceOptions::new().fail_fast())
        .with_context(|| format!("Failed to generate sequence({start}, {stop})"))?;
    let mut lines = format_rows(output.array.as_ref(), &output.errors)?;
    lines
        .pop()
        .context("Sequence function returned no rows")
}
