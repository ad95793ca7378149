//! Error types for the IR crate.

use crate::unit::{Bit, Qubit};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_op_context(.op_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: Qubit,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Bit {bit} not found in circuit{}", format_op_context(.op_name))]
    BitNotFound {
        /// The bit that was not found.
        bit: Bit,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// Unit declared twice in a circuit.
    #[error("Unit {0} is already declared in circuit")]
    DuplicateUnit(String),

    /// Classical register name already in use.
    #[error("Classical register '{0}' already exists")]
    DuplicateRegister(String),

    /// Operation requires a different number of qubits.
    #[error("Operation '{op_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the operation.
        op_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Operation requires a different number of classical bits.
    #[error("Operation '{op_name}' requires {expected} bits, got {got}")]
    BitCountMismatch {
        /// Name of the operation.
        op_name: String,
        /// Expected number of bits.
        expected: usize,
        /// Actual number of bits provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_op_context(.op_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: Qubit,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// Duplicate bit in operation, including its condition bits.
    #[error("Duplicate bit {bit} in operation{}", format_op_context(.op_name))]
    DuplicateBit {
        /// The duplicate bit.
        bit: Bit,
        /// Optional operation name for context.
        op_name: Option<String>,
    },

    /// Malformed classical condition.
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// A condition would be attached to an already conditional operation.
    #[error("Cannot nest condition on already conditional operation '{0}'")]
    NestedCondition(String),

    /// Operation type that the serialized form cannot carry.
    #[error("Unsupported operation: {0}")]
    UnsupportedOp(String),

    /// Malformed serialized circuit.
    #[error("Invalid circuit document: {0}")]
    InvalidDocument(String),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Helper function to format optional operation context.
#[allow(clippy::ref_option)]
fn format_op_context(op_name: &Option<String>) -> String {
    match op_name {
        Some(name) => format!(" (op: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = IrError::QubitNotFound {
            qubit: Qubit::new(3),
            op_name: Some("CX".into()),
        };
        assert_eq!(err.to_string(), "Qubit q[3] not found in circuit (op: CX)");

        let err = IrError::BitNotFound {
            bit: Bit::new(1),
            op_name: None,
        };
        assert_eq!(err.to_string(), "Bit c[1] not found in circuit");
    }
}
