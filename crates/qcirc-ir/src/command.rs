//! Circuit commands combining operations with their arguments.

use crate::circbox::CircBox;
use crate::gate::{Condition, OpType};
use crate::unit::{Bit, Qubit, UnitId};

/// The operation a command applies.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A unitary gate.
    Gate(OpType),
    /// Measurement of one qubit into one bit.
    Measure,
    /// Reset qubit to |0⟩.
    Reset,
    /// A sub-circuit inserted as one operation.
    CircBox(CircBox),
}

impl Operation {
    /// The operation type (never `Conditional`; conditions live on the command).
    pub fn op_type(&self) -> OpType {
        match self {
            Operation::Gate(t) => *t,
            Operation::Measure => OpType::Measure,
            Operation::Reset => OpType::Reset,
            Operation::CircBox(_) => OpType::CircBox,
        }
    }

    /// Get the name of the operation.
    pub fn name(&self) -> &'static str {
        self.op_type().name()
    }

    /// Number of qubit arguments.
    pub fn n_qubits(&self) -> usize {
        match self {
            Operation::CircBox(b) => b.n_qubits(),
            other => other.op_type().n_qubits().unwrap_or(0),
        }
    }

    /// Number of bit arguments, not counting condition bits.
    pub fn n_bits(&self) -> usize {
        match self {
            Operation::CircBox(b) => b.n_bits(),
            other => other.op_type().n_bits().unwrap_or(0),
        }
    }

    /// Get the box if this is a box operation.
    pub fn as_circbox(&self) -> Option<&CircBox> {
        match self {
            Operation::CircBox(b) => Some(b),
            _ => None,
        }
    }
}

impl From<OpType> for Operation {
    fn from(op_type: OpType) -> Self {
        match op_type {
            OpType::Measure => Operation::Measure,
            OpType::Reset => Operation::Reset,
            other => Operation::Gate(other),
        }
    }
}

impl From<CircBox> for Operation {
    fn from(circbox: CircBox) -> Self {
        Operation::CircBox(circbox)
    }
}

/// One operation applied to specific units, optionally under a condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// The operation.
    pub op: Operation,
    /// Qubits the operation acts on.
    pub qubits: Vec<Qubit>,
    /// Bits the operation writes (measurement targets, box bits).
    pub bits: Vec<Bit>,
    /// Optional classical guard.
    pub condition: Option<Condition>,
    /// Optional group label.
    pub opgroup: Option<String>,
}

impl Command {
    /// Create a gate command.
    pub fn gate(op_type: OpType, qubits: impl IntoIterator<Item = Qubit>) -> Self {
        Self {
            op: Operation::from(op_type),
            qubits: qubits.into_iter().collect(),
            bits: vec![],
            condition: None,
            opgroup: None,
        }
    }

    /// Create a measurement command.
    pub fn measure(qubit: Qubit, bit: Bit) -> Self {
        Self {
            op: Operation::Measure,
            qubits: vec![qubit],
            bits: vec![bit],
            condition: None,
            opgroup: None,
        }
    }

    /// Create a reset command.
    pub fn reset(qubit: Qubit) -> Self {
        Self {
            op: Operation::Reset,
            qubits: vec![qubit],
            bits: vec![],
            condition: None,
            opgroup: None,
        }
    }

    /// Create a box command.
    pub fn circbox(
        circbox: CircBox,
        qubits: impl IntoIterator<Item = Qubit>,
        bits: impl IntoIterator<Item = Bit>,
    ) -> Self {
        Self {
            op: Operation::CircBox(circbox),
            qubits: qubits.into_iter().collect(),
            bits: bits.into_iter().collect(),
            condition: None,
            opgroup: None,
        }
    }

    /// Guard the command with a classical condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Attach a group label.
    #[must_use]
    pub fn with_opgroup(mut self, opgroup: impl Into<String>) -> Self {
        self.opgroup = Some(opgroup.into());
        self
    }

    /// Get the name of the command's operation.
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// The serialized operation type: `Conditional` when guarded.
    pub fn op_type(&self) -> OpType {
        if self.condition.is_some() {
            OpType::Conditional
        } else {
            self.op.op_type()
        }
    }

    /// Check if this command carries a condition.
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.op, Operation::Measure)
    }

    /// Check if this is a box.
    pub fn is_circbox(&self) -> bool {
        matches!(self.op, Operation::CircBox(_))
    }

    /// All bits read or written: condition bits first, then written bits.
    pub fn all_bits(&self) -> impl Iterator<Item = &Bit> {
        self.condition
            .iter()
            .flat_map(|c| c.bits().iter())
            .chain(self.bits.iter())
    }

    /// Serialized argument list: condition bits, then qubits, then bits.
    pub fn args(&self) -> Vec<UnitId> {
        let cond = self.condition.iter().flat_map(|c| c.bits().iter());
        cond.map(|b| b.id().clone())
            .chain(self.qubits.iter().map(|q| q.id().clone()))
            .chain(self.bits.iter().map(|b| b.id().clone()))
            .collect()
    }
}
