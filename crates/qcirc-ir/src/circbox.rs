//! Sub-circuits packaged as a single operation.

use uuid::Uuid;

use crate::circuit::Circuit;
use crate::error::IrResult;

/// A circuit used as one operation inside another circuit.
///
/// Box ids are UUID v5 values derived from the inner circuit's compact JSON,
/// so building the same box twice yields the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct CircBox {
    id: Uuid,
    circuit: Box<Circuit>,
}

impl CircBox {
    /// Package `circuit` as a box.
    pub fn new(circuit: Circuit) -> IrResult<Self> {
        let canonical = circuit.to_json_string(false)?;
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, canonical.as_bytes());
        Ok(Self::with_id(id, circuit))
    }

    /// Package `circuit` as a box with a known id.
    pub fn with_id(id: Uuid, circuit: Circuit) -> Self {
        Self {
            id,
            circuit: Box::new(circuit),
        }
    }

    /// The box id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The wrapped circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of qubit arguments the box takes.
    pub fn n_qubits(&self) -> usize {
        self.circuit.n_qubits()
    }

    /// Number of bit arguments the box takes.
    pub fn n_bits(&self) -> usize {
        self.circuit.n_bits()
    }
}
