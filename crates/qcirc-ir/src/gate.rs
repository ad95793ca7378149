//! Operation types and classical conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::unit::{Bit, BitRegister};

/// Operation types. Variant names match the `type` strings of the serialized
/// circuit format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpType {
    // Single-qubit Pauli gates
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    #[serde(rename = "SWAP")]
    Swap,

    // Non-unitary
    /// Measurement of one qubit into one bit.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,

    // Wrappers
    /// A circuit packaged as a single operation.
    CircBox,
    /// An operation guarded by classical bits.
    Conditional,
}

impl OpType {
    /// Get the serialized name of this operation type.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            OpType::X => "X",
            OpType::Y => "Y",
            OpType::Z => "Z",
            OpType::H => "H",
            OpType::S => "S",
            OpType::Sdg => "Sdg",
            OpType::T => "T",
            OpType::Tdg => "Tdg",
            OpType::CX => "CX",
            OpType::CY => "CY",
            OpType::CZ => "CZ",
            OpType::Swap => "SWAP",
            OpType::Measure => "Measure",
            OpType::Reset => "Reset",
            OpType::CircBox => "CircBox",
            OpType::Conditional => "Conditional",
        }
    }

    /// Number of qubits for fixed-arity operation types.
    ///
    /// `CircBox` and `Conditional` take their arity from what they wrap, so
    /// they return `None`.
    #[inline]
    pub fn n_qubits(&self) -> Option<usize> {
        match self {
            OpType::X
            | OpType::Y
            | OpType::Z
            | OpType::H
            | OpType::S
            | OpType::Sdg
            | OpType::T
            | OpType::Tdg
            | OpType::Measure
            | OpType::Reset => Some(1),

            OpType::CX | OpType::CY | OpType::CZ | OpType::Swap => Some(2),

            OpType::CircBox | OpType::Conditional => None,
        }
    }

    /// Number of classical bits for fixed-arity operation types.
    #[inline]
    pub fn n_bits(&self) -> Option<usize> {
        match self {
            OpType::Measure => Some(1),
            OpType::CircBox | OpType::Conditional => None,
            _ => Some(0),
        }
    }

    /// Whether this is a unitary gate.
    pub fn is_gate(&self) -> bool {
        !matches!(
            self,
            OpType::Measure | OpType::Reset | OpType::CircBox | OpType::Conditional
        )
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classical condition guarding an operation.
///
/// The operation runs only when the little-endian value read from `bits`
/// equals `value`. The single-bit forms are built with [`Condition::if_bit`]
/// and [`Condition::if_not_bit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    bits: Vec<Bit>,
    value: u64,
}

impl Condition {
    /// Maximum number of bits a condition may read.
    pub const MAX_WIDTH: usize = 64;

    /// Condition "`bit` == 1".
    pub fn if_bit(bit: Bit) -> Self {
        Self {
            bits: vec![bit],
            value: 1,
        }
    }

    /// Condition "`bit` == 0".
    pub fn if_not_bit(bit: Bit) -> Self {
        Self {
            bits: vec![bit],
            value: 0,
        }
    }

    /// Condition over an arbitrary bit list.
    pub fn new(bits: Vec<Bit>, value: u64) -> IrResult<Self> {
        if bits.is_empty() {
            return Err(IrError::InvalidCondition(
                "condition must read at least one bit".into(),
            ));
        }
        if bits.len() > Self::MAX_WIDTH {
            return Err(IrError::InvalidCondition(format!(
                "condition width {} exceeds {}",
                bits.len(),
                Self::MAX_WIDTH
            )));
        }
        if bits.len() < Self::MAX_WIDTH && value >> bits.len() != 0 {
            return Err(IrError::InvalidCondition(format!(
                "value {value} does not fit in {} bits",
                bits.len()
            )));
        }
        Ok(Self { bits, value })
    }

    /// Condition "whole register == `value`".
    pub fn register(register: &BitRegister, value: u64) -> IrResult<Self> {
        Self::new(register.bits().collect(), value)
    }

    /// The bits read by the condition.
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// The value the bits must hold.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Number of bits read.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Replace every bit through `f`.
    pub(crate) fn map_bits(&self, mut f: impl FnMut(&Bit) -> IrResult<Bit>) -> IrResult<Self> {
        let bits = self.bits.iter().map(&mut f).collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            bits,
            value: self.value,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<String> = self.bits.iter().map(ToString::to_string).collect();
        write!(f, "[{}] == {}", bits.join(", "), self.value)
    }
}
