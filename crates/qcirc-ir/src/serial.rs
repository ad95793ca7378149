//! JSON form of circuits.
//!
//! The document layout follows the pytket circuit schema:
//!
//! ```text
//! {"bits": [["c", [0]], ...],
//!  "commands": [{"args": [["q", [0]]], "op": {"type": "X"}}, ...],
//!  "implicit_permutation": [[["q", [0]], ["q", [0]]], ...],
//!  "phase": "0.0",
//!  "qubits": [["q", [0]], ...]}
//! ```
//!
//! A guarded command is an op of type `Conditional` wrapping the inner op,
//! with the condition bits leading the argument list. A box is an op of
//! type `CircBox` carrying the inner circuit and the box id. Struct fields
//! are declared in alphabetical order so the emitted keys are sorted.

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::circbox::CircBox;
use crate::circuit::Circuit;
use crate::command::{Command, Operation};
use crate::error::{IrError, IrResult};
use crate::gate::{Condition, OpType};
use crate::unit::{Bit, Qubit, UnitId};

/// Serialized circuit document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialCircuit {
    pub bits: Vec<UnitId>,
    pub commands: Vec<SerialCommand>,
    #[serde(default)]
    pub implicit_permutation: Vec<(UnitId, UnitId)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub phase: String,
    pub qubits: Vec<UnitId>,
}

/// Serialized command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialCommand {
    pub args: Vec<UnitId>,
    pub op: SerialOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opgroup: Option<String>,
}

/// Serialized operation.
///
/// Fields this model does not carry, such as `params` or `signature`, are
/// rejected rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerialOp {
    #[serde(rename = "box", default, skip_serializing_if = "Option::is_none")]
    pub op_box: Option<SerialBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Box<SerialConditional>>,
    #[serde(rename = "type")]
    pub op_type: OpType,
}

impl SerialOp {
    fn plain(op_type: OpType) -> Self {
        Self {
            op_box: None,
            conditional: None,
            op_type,
        }
    }
}

/// Serialized box payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialBox {
    pub circuit: Box<SerialCircuit>,
    pub id: Uuid,
    #[serde(rename = "type")]
    pub box_type: OpType,
}

/// Serialized condition payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerialConditional {
    pub op: SerialOp,
    pub value: u64,
    pub width: u32,
}

impl Circuit {
    /// Convert to the serialized document model.
    pub fn to_serial(&self) -> SerialCircuit {
        SerialCircuit {
            bits: self.bits().iter().map(|b| b.id().clone()).collect(),
            commands: self.commands().iter().map(serial_command).collect(),
            implicit_permutation: self
                .implicit_permutation()
                .into_iter()
                .map(|(from, to)| (from.id().clone(), to.id().clone()))
                .collect(),
            name: self.name().map(str::to_string),
            phase: self.phase().to_string(),
            qubits: self.qubits().iter().map(|q| q.id().clone()).collect(),
        }
    }

    /// Build a circuit from the serialized document model, validating every
    /// command.
    pub fn from_serial(serial: SerialCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::empty();
        if let Some(name) = serial.name {
            circuit.set_name(name);
        }
        circuit.set_phase(serial.phase);

        for q in serial.qubits {
            circuit.add_qubit(Qubit::from(q))?;
        }
        for b in serial.bits {
            circuit.add_bit(Bit::from(b))?;
        }
        for (index, command) in serial.commands.into_iter().enumerate() {
            trace!(index, op = %command.op.op_type, "loading command");
            circuit.add_command(command_from_serial(command)?)?;
        }
        circuit.set_implicit_permutation(
            serial
                .implicit_permutation
                .into_iter()
                .map(|(from, to)| (Qubit::from(from), Qubit::from(to))),
        )?;

        Ok(circuit)
    }

    /// Serialize to a JSON value.
    pub fn to_json(&self) -> IrResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_serial())?)
    }

    /// Serialize to JSON text, compact or indented.
    pub fn to_json_string(&self, pretty: bool) -> IrResult<String> {
        let serial = self.to_serial();
        let text = if pretty {
            serde_json::to_string_pretty(&serial)?
        } else {
            serde_json::to_string(&serial)?
        };
        Ok(text)
    }

    /// Load a circuit from JSON text.
    pub fn from_json(text: &str) -> IrResult<Self> {
        let serial: SerialCircuit = serde_json::from_str(text)?;
        Self::from_serial(serial)
    }

    /// Load a circuit from a JSON value.
    pub fn from_json_value(value: serde_json::Value) -> IrResult<Self> {
        let serial: SerialCircuit = serde_json::from_value(value)?;
        Self::from_serial(serial)
    }
}

fn serial_operation(op: &Operation) -> SerialOp {
    match op {
        Operation::CircBox(circbox) => SerialOp {
            op_box: Some(SerialBox {
                circuit: Box::new(circbox.circuit().to_serial()),
                id: circbox.id(),
                box_type: OpType::CircBox,
            }),
            conditional: None,
            op_type: OpType::CircBox,
        },
        other => SerialOp::plain(other.op_type()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn serial_command(command: &Command) -> SerialCommand {
    let inner = serial_operation(&command.op);
    let op = match &command.condition {
        Some(condition) => SerialOp {
            op_box: None,
            conditional: Some(Box::new(SerialConditional {
                op: inner,
                value: condition.value(),
                width: condition.width() as u32,
            })),
            op_type: OpType::Conditional,
        },
        None => inner,
    };
    SerialCommand {
        args: command.args(),
        op,
        opgroup: command.opgroup.clone(),
    }
}

fn operation_from_serial(op: SerialOp) -> IrResult<Operation> {
    match op.op_type {
        OpType::CircBox => {
            let payload = op.op_box.ok_or_else(|| {
                IrError::InvalidDocument("CircBox op without box payload".into())
            })?;
            if payload.box_type != OpType::CircBox {
                return Err(IrError::UnsupportedOp(format!(
                    "box of type {}",
                    payload.box_type
                )));
            }
            let inner = Circuit::from_serial(*payload.circuit)?;
            Ok(Operation::CircBox(CircBox::with_id(payload.id, inner)))
        }
        OpType::Conditional => Err(IrError::UnsupportedOp(
            "Conditional nested inside Conditional".into(),
        )),
        other => Ok(Operation::from(other)),
    }
}

fn command_from_serial(command: SerialCommand) -> IrResult<Command> {
    let SerialCommand { args, op, opgroup } = command;

    let (guard, op) = match op.op_type {
        OpType::Conditional => {
            let conditional = op.conditional.ok_or_else(|| {
                IrError::InvalidDocument("Conditional op without conditional payload".into())
            })?;
            let SerialConditional { op, value, width } = *conditional;
            (Some((width as usize, value)), op)
        }
        _ => (None, op),
    };

    let operation = operation_from_serial(op)?;
    let width = guard.map_or(0, |(w, _)| w);
    let n_qubits = operation.n_qubits();
    let n_bits = operation.n_bits();

    let expected = width + n_qubits + n_bits;
    if args.len() != expected {
        return Err(IrError::InvalidDocument(format!(
            "{} expects {expected} arguments, got {}",
            operation.name(),
            args.len()
        )));
    }

    let mut args = args.into_iter();
    let condition_bits: Vec<Bit> = args.by_ref().take(width).map(Bit::from).collect();
    let qubits: Vec<Qubit> = args.by_ref().take(n_qubits).map(Qubit::from).collect();
    let bits: Vec<Bit> = args.map(Bit::from).collect();

    let condition = match guard {
        Some((_, value)) => Some(Condition::new(condition_bits, value)?),
        None => None,
    };

    Ok(Command {
        op: operation,
        qubits,
        bits,
        condition,
        opgroup,
    })
}
