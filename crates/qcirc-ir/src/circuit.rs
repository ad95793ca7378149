//! High-level circuit builder API.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::circbox::CircBox;
use crate::command::{Command, Operation};
use crate::dag::CommandDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Condition, OpType};
use crate::unit::{Bit, BitRegister, Qubit};

/// Phase of a freshly built circuit.
pub const ZERO_PHASE: &str = "0.0";

/// A quantum circuit.
///
/// Commands are kept in insertion order, which is also the order they are
/// serialized in. Every command is validated against the declared qubits
/// and bits when it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Optional name of the circuit.
    name: Option<String>,
    /// Global phase as a symbolic expression.
    phase: String,
    /// Qubits in declaration order.
    qubits: Vec<Qubit>,
    /// Classical bits in declaration order.
    bits: Vec<Bit>,
    /// Ordered command list.
    commands: Vec<Command>,
    /// Non-identity entries of the implicit qubit permutation.
    permutation: FxHashMap<Qubit, Qubit>,
    qubit_set: FxHashSet<Qubit>,
    bit_set: FxHashSet<Bit>,
}

impl Circuit {
    /// Create a circuit with `num_qubits` qubits in the default register.
    pub fn new(num_qubits: u32) -> Self {
        let mut circuit = Self::empty();
        for i in 0..num_qubits {
            let q = Qubit::new(i);
            circuit.qubit_set.insert(q.clone());
            circuit.qubits.push(q);
        }
        circuit
    }

    /// Create a named circuit with `num_qubits` qubits.
    pub fn named(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(num_qubits);
        circuit.name = Some(name.into());
        circuit
    }

    /// Create a circuit with no units at all.
    pub fn empty() -> Self {
        Self {
            name: None,
            phase: ZERO_PHASE.into(),
            qubits: vec![],
            bits: vec![],
            commands: vec![],
            permutation: FxHashMap::default(),
            qubit_set: FxHashSet::default(),
            bit_set: FxHashSet::default(),
        }
    }

    /// Declare a qubit.
    pub fn add_qubit(&mut self, qubit: Qubit) -> IrResult<()> {
        if !self.qubit_set.insert(qubit.clone()) {
            return Err(IrError::DuplicateUnit(qubit.to_string()));
        }
        self.qubits.push(qubit);
        Ok(())
    }

    /// Declare a classical bit.
    pub fn add_bit(&mut self, bit: Bit) -> IrResult<()> {
        if !self.bit_set.insert(bit.clone()) {
            return Err(IrError::DuplicateUnit(bit.to_string()));
        }
        self.bits.push(bit);
        Ok(())
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_q_register(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<Qubit>> {
        let name = name.into();
        if self.qubits.iter().any(|q| q.id().register() == name) {
            return Err(IrError::DuplicateRegister(name));
        }
        let mut added = Vec::with_capacity(size as usize);
        for i in 0..size {
            let q = Qubit::with_register(&name, i);
            self.add_qubit(q.clone())?;
            added.push(q);
        }
        Ok(added)
    }

    /// Add a named classical register.
    pub fn add_c_register(&mut self, name: impl Into<String>, size: u32) -> IrResult<BitRegister> {
        let name = name.into();
        if self.bits.iter().any(|b| b.id().register() == name) {
            return Err(IrError::DuplicateRegister(name));
        }
        let register = BitRegister::new(&name, size);
        for bit in register.bits() {
            self.add_bit(bit)?;
        }
        debug!(register = %name, size, "added classical register");
        Ok(register)
    }

    /// Look up a classical register by name.
    ///
    /// Registers are derived from the declared bits: the size is one past
    /// the largest single index carrying that register name.
    pub fn c_register(&self, name: &str) -> Option<BitRegister> {
        self.bits
            .iter()
            .filter(|b| b.id().register() == name)
            .filter_map(|b| b.id().single_index())
            .max()
            .map(|max| BitRegister::new(name, max + 1))
    }

    /// All classical registers in order of first declaration.
    pub fn c_registers(&self) -> Vec<BitRegister> {
        let mut names: Vec<&str> = vec![];
        for bit in &self.bits {
            let reg = bit.id().register();
            if !names.contains(&reg) {
                names.push(reg);
            }
        }
        names
            .into_iter()
            .filter_map(|n| self.c_register(n))
            .collect()
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::X, [qubit])
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::Y, [qubit])
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::Z, [qubit])
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::H, [qubit])
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::S, [qubit])
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::Sdg, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::Tdg, [qubit])
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: Qubit, target: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::CX, [control, target])
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: Qubit, target: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::CY, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: Qubit, target: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::CZ, [control, target])
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: Qubit, q2: Qubit) -> IrResult<&mut Self> {
        self.add_gate(OpType::Swap, [q1, q2])
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: Qubit, bit: Bit) -> IrResult<&mut Self> {
        self.add_command(Command::measure(qubit, bit))
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.add_command(Command::reset(qubit))
    }

    /// Apply a gate by type.
    pub fn add_gate(
        &mut self,
        op_type: OpType,
        qubits: impl IntoIterator<Item = Qubit>,
    ) -> IrResult<&mut Self> {
        self.add_command(Command::gate(op_type, qubits))
    }

    /// Apply a gate guarded by a classical condition.
    pub fn add_conditional_gate(
        &mut self,
        op_type: OpType,
        qubits: impl IntoIterator<Item = Qubit>,
        condition: Condition,
    ) -> IrResult<&mut Self> {
        self.add_command(Command::gate(op_type, qubits).with_condition(condition))
    }

    /// Insert a box on `qubits`, optionally guarded by a condition.
    ///
    /// Boxes whose inner circuit has bits are inserted with
    /// [`Circuit::add_command`] and [`Command::circbox`].
    pub fn add_circbox(
        &mut self,
        circbox: CircBox,
        qubits: impl IntoIterator<Item = Qubit>,
        condition: Option<Condition>,
    ) -> IrResult<&mut Self> {
        debug!(
            box_id = %circbox.id(),
            inner_commands = circbox.circuit().commands().len(),
            conditional = condition.is_some(),
            "inserting circuit box"
        );
        let mut command = Command::circbox(circbox, qubits, []);
        command.condition = condition;
        self.add_command(command)
    }

    /// Append a command after validating it against the circuit's units.
    pub fn add_command(&mut self, command: Command) -> IrResult<&mut Self> {
        self.validate(&command)?;
        self.commands.push(command);
        Ok(self)
    }

    fn validate(&self, command: &Command) -> IrResult<()> {
        let op_name = || Some(command.name().to_string());

        if let Operation::Gate(t) = &command.op {
            if !t.is_gate() {
                return Err(IrError::UnsupportedOp(format!("{t} is not a gate")));
            }
        }

        let expected = command.op.n_qubits();
        if command.qubits.len() != expected {
            return Err(IrError::QubitCountMismatch {
                op_name: command.name().to_string(),
                expected,
                got: command.qubits.len(),
            });
        }
        let expected = command.op.n_bits();
        if command.bits.len() != expected {
            return Err(IrError::BitCountMismatch {
                op_name: command.name().to_string(),
                expected,
                got: command.bits.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for qubit in &command.qubits {
            if !self.qubit_set.contains(qubit) {
                return Err(IrError::QubitNotFound {
                    qubit: qubit.clone(),
                    op_name: op_name(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit: qubit.clone(),
                    op_name: op_name(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for bit in command.all_bits() {
            if !self.bit_set.contains(bit) {
                return Err(IrError::BitNotFound {
                    bit: bit.clone(),
                    op_name: op_name(),
                });
            }
            if !seen.insert(bit) {
                return Err(IrError::DuplicateBit {
                    bit: bit.clone(),
                    op_name: op_name(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Replace every box by its inner commands, remapped onto the box's
    /// arguments. Nested boxes are expanded too. A condition on a box is
    /// copied onto each inner command.
    ///
    /// Returns the number of top-level boxes expanded. On error the circuit
    /// is left unchanged.
    pub fn decompose_boxes(&mut self) -> IrResult<usize> {
        let mut expanded = 0;
        let mut commands = Vec::with_capacity(self.commands.len());

        for command in &self.commands {
            match &command.op {
                Operation::CircBox(circbox) => {
                    commands.extend(expand_box(circbox, command)?);
                    expanded += 1;
                }
                _ => commands.push(command.clone()),
            }
        }

        if expanded > 0 {
            debug!(
                boxes = expanded,
                commands = commands.len(),
                "decomposed circuit boxes"
            );
        }
        self.commands = commands;
        Ok(expanded)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the circuit name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get the global phase expression.
    pub fn phase(&self) -> &str {
        &self.phase
    }

    /// Set the global phase expression.
    pub fn set_phase(&mut self, phase: impl Into<String>) {
        self.phase = phase.into();
    }

    /// Get the number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn n_bits(&self) -> usize {
        self.bits.len()
    }

    /// Get the qubits in declaration order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in declaration order.
    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    /// Get the ordered command list.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Count commands applying `op_type`, conditional or not.
    pub fn count_ops(&self, op_type: OpType) -> usize {
        self.commands
            .iter()
            .filter(|c| c.op.op_type() == op_type)
            .count()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        CommandDag::new(self).depth()
    }

    /// Build the dependency DAG of the command list.
    pub fn dag(&self) -> CommandDag {
        CommandDag::new(self)
    }

    /// The implicit qubit permutation, one `(from, to)` pair per qubit.
    pub fn implicit_permutation(&self) -> Vec<(Qubit, Qubit)> {
        self.qubits
            .iter()
            .map(|q| {
                let to = self.permutation.get(q).unwrap_or(q);
                (q.clone(), to.clone())
            })
            .collect()
    }

    /// Replace the implicit qubit permutation.
    ///
    /// Both sides of each pair must be declared qubits, and the pairs must
    /// form a bijection: every qubit appears at most once as a source and at
    /// most once as a target, and the listed sources and targets are the
    /// same set. Unlisted qubits map to themselves.
    pub fn set_implicit_permutation(
        &mut self,
        pairs: impl IntoIterator<Item = (Qubit, Qubit)>,
    ) -> IrResult<()> {
        let mut permutation = FxHashMap::default();
        let mut sources = FxHashSet::default();
        let mut targets = FxHashSet::default();
        for (from, to) in pairs {
            for q in [&from, &to] {
                if !self.qubit_set.contains(q) {
                    return Err(IrError::QubitNotFound {
                        qubit: q.clone(),
                        op_name: None,
                    });
                }
            }
            if !sources.insert(from.clone()) {
                return Err(IrError::InvalidDocument(format!(
                    "qubit {from} appears twice as a permutation source"
                )));
            }
            if !targets.insert(to.clone()) {
                return Err(IrError::InvalidDocument(format!(
                    "qubit {to} appears twice as a permutation target"
                )));
            }
            if from != to {
                permutation.insert(from, to);
            }
        }

        if let Some(missing) = targets.iter().find(|q| !sources.contains(*q)) {
            return Err(IrError::InvalidDocument(format!(
                "qubit {missing} is a permutation target but not a source"
            )));
        }

        self.permutation = permutation;
        Ok(())
    }

    /// Whether the implicit permutation maps every qubit to itself.
    pub fn has_identity_permutation(&self) -> bool {
        self.permutation.is_empty()
    }
}

/// Expand one box command into remapped copies of its inner commands.
///
/// A box whose circuit permutes its qubits implicitly cannot be inlined as a
/// plain command list, so it is rejected.
fn expand_box(circbox: &CircBox, outer: &Command) -> IrResult<Vec<Command>> {
    if !circbox.circuit().has_identity_permutation() {
        return Err(IrError::UnsupportedOp(format!(
            "cannot inline box {} with a non-identity implicit permutation",
            circbox.id()
        )));
    }

    let mut inner = circbox.circuit().clone();
    inner.decompose_boxes()?;

    let qubit_map: FxHashMap<&Qubit, &Qubit> =
        inner.qubits().iter().zip(outer.qubits.iter()).collect();
    let bit_map: FxHashMap<&Bit, &Bit> = inner.bits().iter().zip(outer.bits.iter()).collect();

    let map_qubit = |q: &Qubit| -> IrResult<Qubit> {
        qubit_map
            .get(q)
            .map(|&q| q.clone())
            .ok_or_else(|| IrError::QubitNotFound {
                qubit: q.clone(),
                op_name: Some(OpType::CircBox.name().into()),
            })
    };
    let map_bit = |b: &Bit| -> IrResult<Bit> {
        bit_map
            .get(b)
            .map(|&b| b.clone())
            .ok_or_else(|| IrError::BitNotFound {
                bit: b.clone(),
                op_name: Some(OpType::CircBox.name().into()),
            })
    };

    inner
        .commands()
        .iter()
        .map(|command| {
            let condition = match (&command.condition, &outer.condition) {
                (Some(_), Some(_)) => {
                    return Err(IrError::NestedCondition(command.name().into()));
                }
                (Some(c), None) => Some(c.map_bits(map_bit)?),
                (None, Some(c)) => Some(c.clone()),
                (None, None) => None,
            };
            Ok(Command {
                op: command.op.clone(),
                qubits: command.qubits.iter().map(map_qubit).collect::<IrResult<_>>()?,
                bits: command.bits.iter().map(map_bit).collect::<IrResult<_>>()?,
                condition,
                opgroup: command.opgroup.clone(),
            })
        })
        .collect()
}
