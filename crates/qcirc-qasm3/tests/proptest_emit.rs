//! Property-based tests for QASM3 emission.

use proptest::prelude::*;
use qcirc_ir::{CircBox, Circuit, Condition, OpType, Qubit};
use qcirc_qasm3::emit;

/// Generate circuits mixing plain gates, conditional gates and conditional
/// boxes over 2-4 qubits and a 2-bit register `c`.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2_u32..=4).prop_flat_map(|num_qubits| {
        prop::collection::vec((0..3_u8, 0..num_qubits, 0..2_u32, any::<bool>()), 0..=10).prop_map(
            move |ops| {
                let mut circuit = Circuit::new(num_qubits);
                let c = circuit.add_c_register("c", 2).unwrap();
                for (kind, q, bit, set) in ops {
                    let condition = if set {
                        Condition::if_bit(c.bit(bit))
                    } else {
                        Condition::if_not_bit(c.bit(bit))
                    };
                    let next = (q + 1) % num_qubits;
                    match kind {
                        0 => {
                            circuit.h(Qubit::new(q)).unwrap();
                        }
                        1 => {
                            circuit
                                .add_conditional_gate(OpType::Z, [Qubit::new(q)], condition)
                                .unwrap();
                        }
                        _ => {
                            let mut inner = Circuit::new(2);
                            inner.cx(Qubit::new(0), Qubit::new(1)).unwrap();
                            circuit
                                .add_circbox(
                                    CircBox::new(inner).unwrap(),
                                    [Qubit::new(q), Qubit::new(next)],
                                    Some(condition),
                                )
                                .unwrap();
                        }
                    }
                }
                circuit
            },
        )
    })
}

proptest! {
    /// Emitting the same circuit twice produces identical QASM3.
    #[test]
    fn test_qasm_generation_is_deterministic(circuit in arb_circuit()) {
        let qasm1 = emit(&circuit).expect("First conversion failed");
        let qasm2 = emit(&circuit).expect("Second conversion failed");
        prop_assert_eq!(qasm1, qasm2);
    }

    /// Every conditional command, including inlined box contents, becomes
    /// exactly one `if` block.
    #[test]
    fn test_one_if_block_per_conditional(circuit in arb_circuit()) {
        let conditional = circuit.commands().iter().filter(|c| c.is_conditional()).count();
        let qasm = emit(&circuit).expect("emit");
        prop_assert_eq!(qasm.matches("if (").count(), conditional);
        prop_assert_eq!(qasm.matches("cx ").count(), circuit.count_ops(OpType::CircBox));
    }
}
