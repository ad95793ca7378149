//! Build command implementation.

use anyhow::Result;
use tracing::info;

use qcirc_ir::{CircBox, Circuit, Condition, IrResult, OpType, Qubit};

use super::common::{OutputFormat, render, write_output};

/// Build the conditional demonstration circuit.
///
/// Two qubits and a register `c` of two bits. `q[0]` is flipped and
/// measured into `c[0]`; `Z` on `q[1]` runs when `c[0] == 0`; a box holding
/// `CX q[0], q[1]` runs on `[q[0], q[1]]` when `c[1] == 1`.
pub fn conditional_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::new(2);
    let c = circuit.add_c_register("c", 2)?;

    circuit.x(Qubit::new(0))?.measure(Qubit::new(0), c.bit(0))?;
    circuit.add_conditional_gate(
        OpType::Z,
        [Qubit::new(1)],
        Condition::if_not_bit(c.bit(0)),
    )?;

    let mut entangler = Circuit::new(2);
    entangler.cx(Qubit::new(0), Qubit::new(1))?;

    circuit.add_circbox(
        CircBox::new(entangler)?,
        [Qubit::new(0), Qubit::new(1)],
        Some(Condition::if_bit(c.bit(1))),
    )?;

    Ok(circuit)
}

/// Execute the build command.
pub fn execute(format: OutputFormat, pretty: bool, output: Option<&str>) -> Result<()> {
    let circuit = conditional_circuit()?;
    info!(
        qubits = circuit.n_qubits(),
        bits = circuit.n_bits(),
        commands = circuit.commands().len(),
        depth = circuit.depth(),
        "built conditional circuit"
    );

    let text = render(&circuit, format, pretty)?;
    write_output(&text, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcirc_ir::{Bit, Operation};

    #[test]
    fn test_units_and_register() {
        let circuit = conditional_circuit().unwrap();
        assert_eq!(circuit.n_qubits(), 2);
        assert_eq!(circuit.n_bits(), 2);

        let registers = circuit.c_registers();
        assert_eq!(registers.len(), 1);
        assert_eq!(registers[0].name(), "c");
        assert_eq!(registers[0].size(), 2);
    }

    #[test]
    fn test_command_sequence() {
        let circuit = conditional_circuit().unwrap();
        let cmds = circuit.commands();
        assert_eq!(cmds.len(), 4);

        assert_eq!(cmds[0].op, Operation::Gate(OpType::X));
        assert_eq!(cmds[0].qubits, vec![Qubit::new(0)]);
        assert!(cmds[0].condition.is_none());

        assert!(cmds[1].is_measure());
        assert_eq!(cmds[1].qubits, vec![Qubit::new(0)]);
        assert_eq!(cmds[1].bits, vec![Bit::new(0)]);

        assert_eq!(cmds[2].op, Operation::Gate(OpType::Z));
        assert_eq!(cmds[2].qubits, vec![Qubit::new(1)]);
        assert_eq!(cmds[2].condition, Some(Condition::if_not_bit(Bit::new(0))));

        assert!(cmds[3].is_circbox());
        assert_eq!(cmds[3].qubits, vec![Qubit::new(0), Qubit::new(1)]);
        assert_eq!(cmds[3].condition, Some(Condition::if_bit(Bit::new(1))));
    }

    #[test]
    fn test_box_expands_to_single_cx() {
        let circuit = conditional_circuit().unwrap();
        let inner = circuit.commands()[3].op.as_circbox().unwrap().circuit();
        assert_eq!(inner.commands().len(), 1);
        assert_eq!(inner.count_ops(OpType::CX), 1);

        let mut flat = circuit.clone();
        flat.decompose_boxes().unwrap();
        let last = flat.commands().last().unwrap();
        assert_eq!(last.op, Operation::Gate(OpType::CX));
        assert_eq!(last.qubits, vec![Qubit::new(0), Qubit::new(1)]);
        assert_eq!(last.condition, Some(Condition::if_bit(Bit::new(1))));
    }

    #[test]
    fn test_json_roundtrip() {
        let circuit = conditional_circuit().unwrap();
        let json = circuit.to_json_string(false).unwrap();
        let reloaded = Circuit::from_json(&json).unwrap();
        assert_eq!(reloaded.commands(), circuit.commands());
    }

    #[test]
    fn test_output_is_deterministic() {
        let a = conditional_circuit().unwrap().to_json_string(false).unwrap();
        let b = conditional_circuit().unwrap().to_json_string(false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_depth() {
        // X, Measure, conditional Z (reads c[0]), box (q[0] and q[1])
        assert_eq!(conditional_circuit().unwrap().depth(), 4);
    }
}
