// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph arena owning nodes and carrying the wiring operations.

use crate::connection::Connection;
use crate::node::{Node, NodeId};
use crate::port::{PortDirection, PortRef};
use indexmap::IndexMap;

/// A dataflow graph owning every node in a dense arena.
///
/// Ports store [`PortRef`] index pairs rather than references, so a
/// reference left behind by a disposed node fails the arena lookup
/// instead of dangling. Wiring and disposal take `&mut self` and are
/// meant for a construction/teardown phase; parameter access on the
/// nodes themselves is lock-free and may race with a live tuning
/// thread.
///
/// Cycles, including self-loops, are not structurally prevented.
#[derive(Debug)]
pub struct Graph<V> {
    nodes: IndexMap<NodeId, Node<V>>,
}

impl<V> Graph<V> {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }

    /// Add a node to the graph, returning its ID
    pub fn add_node(&mut self, node: Node<V>) -> NodeId {
        let id = node.id();
        tracing::debug!(
            "Added node {:?} ({} in, {} out, {} params)",
            id,
            node.in_capacity(),
            node.out_capacity(),
            node.parameter_count()
        );
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID. Fails for ids never added or already disposed.
    pub fn node(&self, node_id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node<V>> {
        self.nodes.get_mut(&node_id)
    }

    /// Whether `node_id` currently resolves to a live node
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node<V>> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Wire `node`'s input port `in_port` to `source`'s output port
    /// `out_port`.
    ///
    /// Both directions are written in one logical step: afterwards the
    /// input slot names `(source, out_port)` and the output slot names
    /// `(node, in_port)`. If either port was already occupied, the
    /// previous partner's opposite-direction slot is cleared first, so
    /// no stale one-sided link survives among live nodes.
    ///
    /// On error no port is changed.
    pub fn connect_left(
        &mut self,
        node: NodeId,
        in_port: usize,
        source: NodeId,
        out_port: usize,
    ) -> Result<(), GraphError> {
        self.connect(source, out_port, node, in_port)
    }

    /// Wire `node`'s output port `out_port` to `destination`'s input
    /// port `in_port`. Symmetric to [`Self::connect_left`].
    pub fn connect_right(
        &mut self,
        node: NodeId,
        out_port: usize,
        destination: NodeId,
        in_port: usize,
    ) -> Result<(), GraphError> {
        self.connect(node, out_port, destination, in_port)
    }

    fn connect(
        &mut self,
        from: NodeId,
        out_port: usize,
        to: NodeId,
        in_port: usize,
    ) -> Result<(), GraphError> {
        // Validate everything before touching any slot.
        let from_node = self
            .nodes
            .get(&from)
            .ok_or(GraphError::NodeNotFound(from))?;
        if out_port >= from_node.out_capacity() {
            return Err(GraphError::PortOutOfRange {
                direction: PortDirection::Output,
                port: out_port,
                capacity: from_node.out_capacity(),
            });
        }
        let old_destination = from_node.output(out_port);

        let to_node = self.nodes.get(&to).ok_or(GraphError::NodeNotFound(to))?;
        if in_port >= to_node.in_capacity() {
            return Err(GraphError::PortOutOfRange {
                direction: PortDirection::Input,
                port: in_port,
                capacity: to_node.in_capacity(),
            });
        }
        let old_source = to_node.input(in_port);

        // Rewiring an occupied port: clear the previous partners'
        // opposite-direction slots so both sides stay consistent.
        if let Some(previous) = old_destination {
            self.clear_input_slot(previous);
        }
        if let Some(previous) = old_source {
            self.clear_output_slot(previous);
        }

        if let Some(node) = self.nodes.get_mut(&from) {
            node.set_output(out_port, Some(PortRef::new(to, in_port)));
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.set_input(in_port, Some(PortRef::new(from, out_port)));
        }

        tracing::debug!(
            "Connected {:?}[out {}] -> {:?}[in {}]",
            from,
            out_port,
            to,
            in_port
        );
        Ok(())
    }

    /// Sever the connection at `node`'s input port `in_port`, clearing
    /// both directions. No-op on an empty port.
    pub fn disconnect_input(&mut self, node: NodeId, in_port: usize) -> Result<(), GraphError> {
        let n = self.nodes.get(&node).ok_or(GraphError::NodeNotFound(node))?;
        if in_port >= n.in_capacity() {
            return Err(GraphError::PortOutOfRange {
                direction: PortDirection::Input,
                port: in_port,
                capacity: n.in_capacity(),
            });
        }
        if let Some(partner) = n.input(in_port) {
            self.clear_output_slot(partner);
            if let Some(n) = self.nodes.get_mut(&node) {
                n.set_input(in_port, None);
            }
            tracing::trace!("Disconnected {:?}[in {}]", node, in_port);
        }
        Ok(())
    }

    /// Sever the connection at `node`'s output port `out_port`,
    /// clearing both directions. No-op on an empty port.
    pub fn disconnect_output(&mut self, node: NodeId, out_port: usize) -> Result<(), GraphError> {
        let n = self.nodes.get(&node).ok_or(GraphError::NodeNotFound(node))?;
        if out_port >= n.out_capacity() {
            return Err(GraphError::PortOutOfRange {
                direction: PortDirection::Output,
                port: out_port,
                capacity: n.out_capacity(),
            });
        }
        if let Some(partner) = n.output(out_port) {
            self.clear_input_slot(partner);
            if let Some(n) = self.nodes.get_mut(&node) {
                n.set_output(out_port, None);
            }
            tracing::trace!("Disconnected {:?}[out {}]", node, out_port);
        }
        Ok(())
    }

    /// Dispose a node: remove its arena slot, clear the removed node's
    /// ports and parameters, and return it inert.
    ///
    /// Idempotent: a second call returns `None` and leaves the graph
    /// unchanged. Remote ends of existing connections are not unwired;
    /// their back-references to this id become dangling and fail
    /// [`Self::node`] lookups. Callers must ensure no other thread is
    /// reading the node's parameters at the moment of disposal.
    pub fn dispose(&mut self, node_id: NodeId) -> Option<Node<V>> {
        let mut node = self.nodes.swap_remove(&node_id)?;
        node.dispose();
        tracing::debug!("Disposed node {:?}", node_id);
        Some(node)
    }

    /// Enumerate the live connections, one per wired output slot whose
    /// target still resolves. Dangling references to disposed nodes
    /// are skipped.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let nodes = &self.nodes;
        nodes.iter().flat_map(move |(&id, node)| {
            node.outputs().enumerate().filter_map(move |(port, slot)| {
                let target = slot?;
                nodes.contains_key(&target.node).then_some(Connection {
                    from_node: id,
                    from_port: port,
                    to_node: target.node,
                    to_port: target.port,
                })
            })
        })
    }

    /// Connections involving a specific node, on either end
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = Connection> + '_ {
        self.connections()
            .filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections().count()
    }

    fn clear_input_slot(&mut self, port: PortRef) {
        // The partner may itself have been disposed; then there is
        // nothing left to clear.
        if let Some(node) = self.nodes.get_mut(&port.node) {
            node.set_input(port.port, None);
        }
    }

    fn clear_output_slot(&mut self, port: PortRef) {
        if let Some(node) = self.nodes.get_mut(&port.node) {
            node.set_output(port.port, None);
        }
    }
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Error from a wiring operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Node not found (never added, or already disposed)
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port index outside the node's fixed capacity
    #[error("{direction:?} port {port} out of range (capacity {capacity})")]
    PortOutOfRange {
        /// Which side of the node the index addressed
        direction: PortDirection,
        /// The offending port index
        port: usize,
        /// The node's fixed port count for that direction
        capacity: usize,
    },
}
