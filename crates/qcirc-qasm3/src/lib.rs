//! `OpenQASM` 3 Emitter for qcirc
//!
//! Renders a [`qcirc_ir::Circuit`] as `OpenQASM` 3.0 source. Circuit boxes are
//! inlined and classically conditioned commands become `if` blocks.
//!
//! # Supported Features
//!
//! | Feature | Example |
//! |---------|---------|
//! | Qubit registers | `qubit[2] q;` |
//! | Classical registers | `bit[2] c;` |
//! | Standard gates | `x q[0];`, `cx q[0], q[1];` |
//! | Measurements | `c[0] = measure q[0];` |
//! | Reset | `reset q[0];` |
//! | Single-bit conditions | `if (c[0] == 0) { z q[1]; }` |
//! | Register conditions | `if (c == 2) { x q[0]; }` |
//!
//! # Example
//!
//! ```rust
//! use qcirc_ir::{Circuit, Condition, OpType, Qubit};
//! use qcirc_qasm3::emit;
//!
//! let mut circuit = Circuit::new(2);
//! let c = circuit.add_c_register("c", 1).unwrap();
//! circuit.x(Qubit::new(0)).unwrap().measure(Qubit::new(0), c.bit(0)).unwrap();
//! circuit
//!     .add_conditional_gate(OpType::Z, [Qubit::new(1)], Condition::if_bit(c.bit(0)))
//!     .unwrap();
//!
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("c[0] = measure q[0];"));
//! assert!(qasm.contains("if (c[0] == 1) {"));
//! ```

mod emitter;
mod error;

pub use emitter::emit;
pub use error::{Qasm3Error, Qasm3Result};
