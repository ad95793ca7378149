//! Convert command implementation.

use anyhow::Result;
use console::style;

use super::common::{OutputFormat, load_circuit, render, write_output};

/// Execute the convert command.
pub fn execute(
    input: &str,
    format: OutputFormat,
    pretty: bool,
    output: Option<&str>,
) -> Result<()> {
    let circuit = load_circuit(input)?;
    let text = render(&circuit, format, pretty)?;
    write_output(&text, output)?;

    if let Some(path) = output {
        eprintln!(
            "{} Converted {} -> {}",
            style("✓").green().bold(),
            style(input).green(),
            style(path).green()
        );
    }

    Ok(())
}
