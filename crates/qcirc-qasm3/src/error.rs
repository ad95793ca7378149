//! Error types for the QASM3 emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Qasm3Error {
    /// Construct with no OpenQASM 3 rendering.
    #[error("Unsupported in OpenQASM 3 output: {0}")]
    Unsupported(String),

    /// IR error while preparing the circuit.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] qcirc_ir::IrError),
}

/// Result type for emission.
pub type Qasm3Result<T> = Result<T, Qasm3Error>;
