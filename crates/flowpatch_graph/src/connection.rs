// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) views over the graph's wiring state.

use crate::node::NodeId;
use crate::port::PortRef;

/// A live connection between an output port and an input port.
///
/// Connections are not stored: wiring lives in the port slots of the
/// two endpoint nodes, and the graph derives these views on demand
/// for collaborators that draw connection lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Source node ID
    pub from_node: NodeId,
    /// Source output port index
    pub from_port: usize,
    /// Target node ID
    pub to_node: NodeId,
    /// Target input port index
    pub to_port: usize,
}

impl Connection {
    /// The source endpoint as a port reference
    pub fn from(&self) -> PortRef {
        PortRef::new(self.from_node, self.from_port)
    }

    /// The target endpoint as a port reference
    pub fn to(&self) -> PortRef {
        PortRef::new(self.to_node, self.to_port)
    }

    /// Check if this connection involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from_node == node_id || self.to_node == node_id
    }

    /// Check if this connection involves a specific port
    pub fn involves_port(&self, port: PortRef) -> bool {
        self.from() == port || self.to() == port
    }
}
