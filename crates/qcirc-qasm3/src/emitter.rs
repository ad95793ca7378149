//! QASM3 emitter for serializing circuits.

use qcirc_ir::{Circuit, Command, Condition, OpType, Operation, UnitId};
use tracing::debug;

use crate::error::{Qasm3Error, Qasm3Result};

/// Emit a circuit as QASM3 source code.
///
/// Boxes are inlined first; conditional commands become `if` blocks.
/// Circuits with a non-identity implicit permutation are rejected.
pub fn emit(circuit: &Circuit) -> Qasm3Result<String> {
    if !circuit.has_identity_permutation() {
        return Err(Qasm3Error::Unsupported(
            "implicit qubit permutation has no QASM3 form".into(),
        ));
    }

    let mut flat = circuit.clone();
    let boxes = flat.decompose_boxes()?;
    if boxes > 0 {
        debug!(boxes, "inlined circuit boxes for QASM3 output");
    }
    let mut emitter = Emitter::new();
    emitter.emit_circuit(&flat)
}

/// A declared register: name and size.
type Register = (String, u32);

/// QASM3 emitter.
struct Emitter {
    output: String,
    indent: usize,
}

#[allow(clippy::unused_self)]
impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> Qasm3Result<String> {
        // Version
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");

        let qregs = registers(circuit.qubits().iter().map(|q| q.id()))?;
        let cregs = registers(circuit.bits().iter().map(|b| b.id()))?;
        if let Some((name, _)) = cregs
            .iter()
            .find(|(c, _)| qregs.iter().any(|(q, _)| q == c))
        {
            return Err(Qasm3Error::Unsupported(format!(
                "register name '{name}' is used for both qubits and bits"
            )));
        }

        for (name, size) in &qregs {
            self.writeln(&format!("qubit[{size}] {name};"));
        }
        for (name, size) in &cregs {
            self.writeln(&format!("bit[{size}] {name};"));
        }
        if !qregs.is_empty() || !cregs.is_empty() {
            self.writeln("");
        }

        for command in circuit.commands() {
            self.emit_command(command, &cregs)?;
        }

        Ok(std::mem::take(&mut self.output))
    }

    fn emit_command(&mut self, command: &Command, cregs: &[Register]) -> Qasm3Result<()> {
        let statement = self.emit_statement(command)?;
        match &command.condition {
            None => self.writeln(&statement),
            Some(condition) => {
                let guard = self.emit_guard(condition, cregs)?;
                self.writeln(&format!("if ({guard}) {{"));
                self.indent += 1;
                self.writeln(&statement);
                self.indent -= 1;
                self.writeln("}");
            }
        }
        Ok(())
    }

    fn emit_statement(&self, command: &Command) -> Qasm3Result<String> {
        let qubits = command
            .qubits
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        match &command.op {
            Operation::Gate(op_type) => {
                let name = self.emit_gate_name(*op_type)?;
                Ok(format!("{name} {qubits};"))
            }
            Operation::Measure => Ok(format!("{} = measure {qubits};", command.bits[0])),
            Operation::Reset => Ok(format!("reset {qubits};")),
            Operation::CircBox(_) => Err(Qasm3Error::Unsupported(
                "CircBox left after decomposition".into(),
            )),
        }
    }

    fn emit_gate_name(&self, op_type: OpType) -> Qasm3Result<&'static str> {
        let name = match op_type {
            OpType::X => "x",
            OpType::Y => "y",
            OpType::Z => "z",
            OpType::H => "h",
            OpType::S => "s",
            OpType::Sdg => "sdg",
            OpType::T => "t",
            OpType::Tdg => "tdg",
            OpType::CX => "cx",
            OpType::CY => "cy",
            OpType::CZ => "cz",
            OpType::Swap => "swap",
            other => {
                return Err(Qasm3Error::Unsupported(format!("{other} is not a gate")));
            }
        };
        Ok(name)
    }

    /// Single bits compare directly; wider conditions must cover a whole
    /// register in index order and compare the register.
    fn emit_guard(&self, condition: &Condition, cregs: &[Register]) -> Qasm3Result<String> {
        let value = condition.value();
        if let [bit] = condition.bits() {
            return Ok(format!("{bit} == {value}"));
        }

        let first = condition.bits()[0].id().register();
        let whole_register = cregs
            .iter()
            .find(|(name, _)| name == first)
            .is_some_and(|(_, size)| *size as usize == condition.width())
            && condition.bits().iter().enumerate().all(|(i, b)| {
                b.id().register() == first && b.id().single_index() == Some(i as u32)
            });

        if whole_register {
            Ok(format!("{first} == {value}"))
        } else {
            Err(Qasm3Error::Unsupported(format!(
                "condition {condition} does not cover a whole register"
            )))
        }
    }

    fn writeln(&mut self, line: &str) {
        let indent = "    ".repeat(self.indent);
        self.output.push_str(&indent);
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Group units by register in order of first appearance.
fn registers<'a>(units: impl Iterator<Item = &'a UnitId>) -> Qasm3Result<Vec<Register>> {
    let mut regs: Vec<Register> = vec![];
    for unit in units {
        let index = unit.single_index().ok_or_else(|| {
            Qasm3Error::Unsupported(format!("unit {unit} has a multi-dimensional index"))
        })?;
        match regs.iter_mut().find(|(name, _)| name == unit.register()) {
            Some((_, size)) => *size = (*size).max(index + 1),
            None => regs.push((unit.register().to_string(), index + 1)),
        }
    }
    Ok(regs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcirc_ir::{Bit, CircBox, Qubit};

    #[test]
    fn test_emit_plain_circuit() {
        let mut circuit = Circuit::new(2);
        let c = circuit.add_c_register("c", 2).unwrap();
        circuit
            .h(Qubit::new(0))
            .unwrap()
            .cx(Qubit::new(0), Qubit::new(1))
            .unwrap()
            .measure(Qubit::new(1), c.bit(1))
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert_eq!(
            qasm,
            "OPENQASM 3.0;\n\
             include \"stdgates.inc\";\n\
             \n\
             qubit[2] q;\n\
             bit[2] c;\n\
             \n\
             h q[0];\n\
             cx q[0], q[1];\n\
             c[1] = measure q[1];\n"
        );
    }

    #[test]
    fn test_emit_conditional_box_inlined() {
        let mut circuit = Circuit::new(2);
        let c = circuit.add_c_register("c", 2).unwrap();
        circuit
            .add_conditional_gate(OpType::Z, [Qubit::new(1)], Condition::if_not_bit(c.bit(0)))
            .unwrap();
        let mut inner = Circuit::new(2);
        inner.cx(Qubit::new(0), Qubit::new(1)).unwrap();
        circuit
            .add_circbox(
                CircBox::new(inner).unwrap(),
                [Qubit::new(1), Qubit::new(0)],
                Some(Condition::if_bit(c.bit(1))),
            )
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("if (c[0] == 0) {\n    z q[1];\n}\n"));
        assert!(qasm.contains("if (c[1] == 1) {\n    cx q[1], q[0];\n}\n"));
        // The source circuit keeps its box.
        assert_eq!(circuit.count_ops(OpType::CircBox), 1);
    }

    #[test]
    fn test_emit_register_condition() {
        let mut circuit = Circuit::new(1);
        let m = circuit.add_c_register("m", 2).unwrap();
        circuit
            .add_conditional_gate(OpType::X, [Qubit::new(0)], Condition::register(&m, 2).unwrap())
            .unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("bit[2] m;"));
        assert!(qasm.contains("if (m == 2) {"));
    }

    #[test]
    fn test_partial_register_condition_unsupported() {
        let mut circuit = Circuit::new(1);
        circuit.add_c_register("m", 3).unwrap();
        let condition = Condition::new(
            vec![Bit::with_register("m", 0), Bit::with_register("m", 1)],
            1,
        )
        .unwrap();
        circuit
            .add_conditional_gate(OpType::X, [Qubit::new(0)], condition)
            .unwrap();

        assert!(matches!(
            emit(&circuit).unwrap_err(),
            Qasm3Error::Unsupported(_)
        ));
    }

    #[test]
    fn test_emit_reset_and_named_registers() {
        let mut circuit = Circuit::empty();
        let anc = circuit.add_q_register("anc", 1).unwrap();
        circuit.reset(anc[0].clone()).unwrap();

        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("qubit[1] anc;"));
        assert!(qasm.contains("reset anc[0];"));
    }

    #[test]
    fn test_implicit_permutation_unsupported() {
        let mut circuit = Circuit::new(2);
        circuit.cx(Qubit::new(0), Qubit::new(1)).unwrap();
        circuit
            .set_implicit_permutation([
                (Qubit::new(0), Qubit::new(1)),
                (Qubit::new(1), Qubit::new(0)),
            ])
            .unwrap();

        assert!(matches!(
            emit(&circuit).unwrap_err(),
            Qasm3Error::Unsupported(_)
        ));
    }

    #[test]
    fn test_shared_register_name_unsupported() {
        let mut circuit = Circuit::empty();
        let qubits = circuit.add_q_register("c", 1).unwrap();
        let c = circuit.add_c_register("c", 1).unwrap();
        circuit.measure(qubits[0].clone(), c.bit(0)).unwrap();

        assert!(matches!(
            emit(&circuit).unwrap_err(),
            Qasm3Error::Unsupported(_)
        ));
    }
}
