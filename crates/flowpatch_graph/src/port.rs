// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port addressing for node inputs/outputs.

use crate::node::NodeId;

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// A lightweight reference to one port on one node.
///
/// Port slots store these index pairs instead of node references: the
/// [`Graph`](crate::graph::Graph) arena owns every node, and a
/// `PortRef` left behind by a disposed node simply fails to resolve
/// rather than dangling into freed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    /// Node the port belongs to
    pub node: NodeId,
    /// Port index on that node
    pub port: usize,
}

impl PortRef {
    /// Create a new port reference
    pub fn new(node: NodeId, port: usize) -> Self {
        Self { node, port }
    }
}
