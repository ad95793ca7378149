//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use qcirc_ir::Circuit;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON circuit document.
    Json,
    /// OpenQASM 3 source.
    Qasm3,
}

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let circuit =
        Circuit::from_json(&source).with_context(|| format!("Failed to load circuit: {path}"))?;
    info!(
        path,
        qubits = circuit.n_qubits(),
        bits = circuit.n_bits(),
        commands = circuit.commands().len(),
        "loaded circuit"
    );
    Ok(circuit)
}

/// Render a circuit in the requested format.
pub fn render(circuit: &Circuit, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(circuit.to_json_string(pretty)?),
        OutputFormat::Qasm3 => Ok(qcirc_qasm3::emit(circuit)?),
    }
}

/// Write a rendered document to `output`, or stdout when `None`.
pub fn write_output(text: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            let mut contents = text.to_string();
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            fs::write(path, contents).with_context(|| format!("Failed to write file: {path}"))?;
            info!(path, "wrote output");
        }
        None => {
            if text.ends_with('\n') {
                print!("{text}");
            } else {
                println!("{text}");
            }
        }
    }
    Ok(())
}
