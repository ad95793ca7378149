//! Qubit and classical bit types.
//!
//! Every wire in a circuit is addressed by a [`UnitId`]: a register name plus
//! an index vector. Serialized, a unit is the two-element array
//! `["q", [0]]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the register that unnamed qubits belong to.
pub const DEFAULT_QUBIT_REGISTER: &str = "q";

/// Name of the register that unnamed classical bits belong to.
pub const DEFAULT_BIT_REGISTER: &str = "c";

/// A register name together with an index vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub String, pub Vec<u32>);

impl UnitId {
    /// Create a unit with a single index.
    pub fn new(register: impl Into<String>, index: u32) -> Self {
        UnitId(register.into(), vec![index])
    }

    /// The register this unit belongs to.
    #[inline]
    pub fn register(&self) -> &str {
        &self.0
    }

    /// The index vector within the register.
    #[inline]
    pub fn index(&self) -> &[u32] {
        &self.1
    }

    /// The index if the unit is addressed by exactly one index.
    pub fn single_index(&self) -> Option<u32> {
        match self.1.as_slice() {
            [i] => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idx: Vec<String> = self.1.iter().map(u32::to_string).collect();
        write!(f, "{}[{}]", self.0, idx.join(", "))
    }
}

/// A quantum bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qubit(UnitId);

impl Qubit {
    /// Qubit `q[index]` in the default register.
    pub fn new(index: u32) -> Self {
        Qubit(UnitId::new(DEFAULT_QUBIT_REGISTER, index))
    }

    /// Qubit `register[index]`.
    pub fn with_register(register: impl Into<String>, index: u32) -> Self {
        Qubit(UnitId::new(register, index))
    }

    /// The underlying unit id.
    #[inline]
    pub fn id(&self) -> &UnitId {
        &self.0
    }
}

impl From<UnitId> for Qubit {
    fn from(id: UnitId) -> Self {
        Qubit(id)
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A classical bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bit(UnitId);

impl Bit {
    /// Bit `c[index]` in the default register.
    pub fn new(index: u32) -> Self {
        Bit(UnitId::new(DEFAULT_BIT_REGISTER, index))
    }

    /// Bit `register[index]`.
    pub fn with_register(register: impl Into<String>, index: u32) -> Self {
        Bit(UnitId::new(register, index))
    }

    /// The underlying unit id.
    #[inline]
    pub fn id(&self) -> &UnitId {
        &self.0
    }
}

impl From<UnitId> for Bit {
    fn from(id: UnitId) -> Self {
        Bit(id)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A named, ordered group of classical bits owned by a circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRegister {
    name: String,
    size: u32,
}

impl BitRegister {
    pub(crate) fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Register name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bits in the register.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Bit `name[index]`. The index is not checked here; the circuit rejects
    /// unknown bits when they are used.
    pub fn bit(&self, index: u32) -> Bit {
        Bit::with_register(&self.name, index)
    }

    /// All bits of the register in index order.
    pub fn bits(&self) -> impl Iterator<Item = Bit> + '_ {
        (0..self.size).map(|i| self.bit(i))
    }
}
