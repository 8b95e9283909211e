// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the dataflow graph.

use crate::param::ParamSlot;
use crate::port::PortRef;
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// The computation attached to a node: one value per input port, in
/// port order, to a single output value.
///
/// Stored as opaque data; the graph core never invokes it.
pub type Operation<V> = Box<dyn Fn(&[V]) -> V + Send + Sync>;

/// A computational vertex with fixed-arity ports and tunable
/// parameter slots.
///
/// Port counts and the parameter count are fixed at construction.
/// Wiring goes through [`Graph`](crate::graph::Graph), which owns
/// every node; parameters are readable and writable through `&self`
/// from any thread.
pub struct Node<V> {
    id: NodeId,
    inputs: Box<[Option<PortRef>]>,
    outputs: Box<[Option<PortRef>]>,
    parameters: Box<[ParamSlot]>,
    /// The node's computation. Opaque to the core; invoked only by
    /// whatever execution layer sits on top of the graph.
    pub operation: Operation<V>,
}

impl<V> Node<V> {
    /// Create a node with all ports empty and every parameter at its
    /// default value of `0.0`.
    pub fn new(
        in_capacity: usize,
        out_capacity: usize,
        parameter_count: usize,
        operation: Operation<V>,
    ) -> Self {
        Self {
            id: NodeId::new(),
            inputs: vec![None; in_capacity].into_boxed_slice(),
            outputs: vec![None; out_capacity].into_boxed_slice(),
            parameters: std::iter::repeat_with(ParamSlot::new)
                .take(parameter_count)
                .collect(),
            operation,
        }
    }

    /// Create a node with a single output port, the common case for
    /// value-producing nodes.
    pub fn single_output(
        in_capacity: usize,
        parameter_count: usize,
        operation: Operation<V>,
    ) -> Self {
        Self::new(in_capacity, 1, parameter_count, operation)
    }

    /// Unique instance ID, assigned at construction
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of input ports
    pub fn in_capacity(&self) -> usize {
        self.inputs.len()
    }

    /// Number of output ports
    pub fn out_capacity(&self) -> usize {
        self.outputs.len()
    }

    /// Number of parameter slots
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// The source wired to input port `port`, if any.
    ///
    /// Returns `None` for an empty slot and for an out-of-range index.
    pub fn input(&self, port: usize) -> Option<PortRef> {
        self.inputs.get(port).copied().flatten()
    }

    /// The destination wired to output port `port`, if any.
    ///
    /// Returns `None` for an empty slot and for an out-of-range index.
    pub fn output(&self, port: usize) -> Option<PortRef> {
        self.outputs.get(port).copied().flatten()
    }

    /// All input slots in port order, empty or not. Lets a renderer
    /// draw one marker per port and a line per occupied slot.
    pub fn inputs(&self) -> impl Iterator<Item = Option<PortRef>> + '_ {
        self.inputs.iter().copied()
    }

    /// All output slots in port order, empty or not.
    pub fn outputs(&self) -> impl Iterator<Item = Option<PortRef>> + '_ {
        self.outputs.iter().copied()
    }

    /// Read parameter `index`, or `None` if the slot is unset.
    ///
    /// Atomic; safe to call concurrently with [`Self::set_parameter`]
    /// from any thread.
    ///
    /// # Panics
    /// Panics if `index >= parameter_count()`. Slot indices are fixed
    /// at construction, so an out-of-range index is a caller bug.
    pub fn parameter(&self, index: usize) -> Option<f32> {
        self.parameters[index].get()
    }

    /// Set parameter `index` to a value, or clear it with `None`.
    ///
    /// Atomic per slot, last write wins; concurrent readers observe
    /// either the old or the new state, never a torn value.
    ///
    /// # Panics
    /// Panics if `index >= parameter_count()`.
    pub fn set_parameter(&self, index: usize, value: Option<f32>) {
        self.parameters[index].set(value);
    }

    /// Clear every port slot and set every parameter to absent.
    ///
    /// Idempotent. Remote nodes wired to this one are not notified;
    /// their back-references become dangling and fail arena lookups
    /// once the node is removed from its graph.
    pub fn dispose(&mut self) {
        self.inputs.fill(None);
        self.outputs.fill(None);
        for slot in &*self.parameters {
            slot.clear();
        }
    }

    pub(crate) fn set_input(&mut self, port: usize, value: Option<PortRef>) {
        self.inputs[port] = value;
    }

    pub(crate) fn set_output(&mut self, port: usize, value: Option<PortRef>) {
        self.outputs[port] = value;
    }
}

impl<V> std::fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
