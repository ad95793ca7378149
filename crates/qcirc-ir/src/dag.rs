//! Dependency DAG over a circuit's command list.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use rustc_hash::FxHashMap;

use crate::circuit::Circuit;
use crate::unit::{Bit, Qubit};

/// Node index type for the command DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireId {
    /// A quantum wire.
    Qubit(Qubit),
    /// A classical wire.
    Bit(Bit),
}

impl From<Qubit> for WireId {
    fn from(q: Qubit) -> Self {
        WireId::Qubit(q)
    }
}

impl From<Bit> for WireId {
    fn from(b: Bit) -> Self {
        WireId::Bit(b)
    }
}

/// Dependency graph of a circuit's commands.
///
/// Node weights are command indices. An edge `a -> b` labelled with a wire
/// means `b` is the next command after `a` touching that wire. Condition
/// bits count as touched wires, so a conditional command depends on the
/// last command that wrote its condition bits.
///
/// Nodes are added in command order, so node `i` is command `i` and the
/// command order is always a valid topological order.
#[derive(Debug)]
pub struct CommandDag {
    graph: DiGraph<usize, WireId, u32>,
}

impl CommandDag {
    /// Build the DAG of `circuit`'s current command list.
    pub fn new(circuit: &Circuit) -> Self {
        let mut graph = DiGraph::default();
        let mut wire_front: FxHashMap<WireId, NodeIndex> = FxHashMap::default();

        for (i, command) in circuit.commands().iter().enumerate() {
            let node = graph.add_node(i);
            let wires = command
                .qubits
                .iter()
                .cloned()
                .map(WireId::from)
                .chain(command.all_bits().cloned().map(WireId::from));
            for wire in wires {
                if let Some(prev) = wire_front.insert(wire.clone(), node) {
                    graph.add_edge(prev, node, wire);
                }
            }
        }

        Self { graph }
    }

    /// Number of command nodes.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Indices of the commands `command` directly depends on, ascending.
    pub fn predecessors(&self, command: usize) -> Vec<usize> {
        let mut preds: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(command), Direction::Incoming)
            .map(|n| self.graph[n])
            .collect();
        preds.sort_unstable();
        preds.dedup();
        preds
    }

    /// Command indices grouped by layer: a command sits one layer after the
    /// deepest command it depends on.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let mut level = vec![0usize; self.graph.node_count()];
        let mut layers: Vec<Vec<usize>> = vec![];

        for node in self.graph.node_indices() {
            let l = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|p| level[p.index()] + 1)
                .max()
                .unwrap_or(0);
            level[node.index()] = l;
            if layers.len() <= l {
                layers.resize_with(l + 1, Vec::new);
            }
            layers[l].push(self.graph[node]);
        }

        layers
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers().len()
    }
}
