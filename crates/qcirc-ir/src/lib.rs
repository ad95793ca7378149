//! qcirc Circuit Model
//!
//! This crate provides the data structures for building quantum circuits
//! with classical control: named classical registers, operations guarded by
//! classical bits, and sub-circuits inserted as a single operation.
//!
//! # Core Components
//!
//! - **Units**: [`Qubit`], [`Bit`] addressed by register name and index, and
//!   [`BitRegister`] handles for classical registers
//! - **Operations**: [`OpType`] for the supported gate set, [`Condition`] for
//!   classical guards, [`CircBox`] for sub-circuits
//! - **Commands**: [`Command`] combining an operation with its arguments
//! - **Circuit**: [`Circuit`] ordered command list with a builder API
//! - **Serialization**: [`SerialCircuit`] JSON document model
//! - **DAG**: [`CommandDag`] dependency graph for depth analysis
//!
//! # Example: Conditional Box
//!
//! ```rust
//! use qcirc_ir::{CircBox, Circuit, Condition, OpType, Qubit};
//!
//! let mut circuit = Circuit::new(2);
//! let c = circuit.add_c_register("c", 2).unwrap();
//!
//! circuit.x(Qubit::new(0)).unwrap().measure(Qubit::new(0), c.bit(0)).unwrap();
//! circuit
//!     .add_conditional_gate(OpType::Z, [Qubit::new(1)], Condition::if_not_bit(c.bit(0)))
//!     .unwrap();
//!
//! let mut inner = Circuit::new(2);
//! inner.cx(Qubit::new(0), Qubit::new(1)).unwrap();
//! circuit
//!     .add_circbox(
//!         CircBox::new(inner).unwrap(),
//!         [Qubit::new(0), Qubit::new(1)],
//!         Some(Condition::if_bit(c.bit(1))),
//!     )
//!     .unwrap();
//!
//! let json = circuit.to_json_string(false).unwrap();
//! let reloaded = qcirc_ir::Circuit::from_json(&json).unwrap();
//! assert_eq!(reloaded, circuit);
//! ```
//!
//! # Supported Operations
//!
//! | Op | Qubits | Bits |
//! |----|--------|------|
//! | `X`, `Y`, `Z`, `H`, `S`, `Sdg`, `T`, `Tdg` | 1 | 0 |
//! | `CX`, `CY`, `CZ`, `SWAP` | 2 | 0 |
//! | `Measure` | 1 | 1 |
//! | `Reset` | 1 | 0 |
//! | `CircBox` | inner qubits | inner bits |

pub mod circbox;
pub mod circuit;
pub mod command;
pub mod dag;
pub mod error;
pub mod gate;
pub mod serial;
pub mod unit;

pub use circbox::CircBox;
pub use circuit::Circuit;
pub use command::{Command, Operation};
pub use dag::{CommandDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{Condition, OpType};
pub use serial::{SerialBox, SerialCircuit, SerialCommand, SerialConditional, SerialOp};
pub use unit::{Bit, BitRegister, Qubit, UnitId};
