// SPDX-License-Identifier: MIT OR Apache-2.0
//! Dataflow node graph core for FlowPatch.
//!
//! This crate provides the graph model that the patch editor and any
//! execution layer build on:
//! - Nodes with fixed-arity input/output ports
//! - Lock-free tunable parameter slots
//! - Explicit bidirectional wiring and disposal
//!
//! ## Architecture
//!
//! A [`Graph`] arena owns every [`Node`]; ports hold [`PortRef`]
//! index pairs rather than references, so references to disposed
//! nodes fail a lookup instead of dangling. The computation attached
//! to a node is opaque data; scheduling and evaluation live outside
//! this crate, as does all rendering: a visualization collaborator
//! only reads port cardinalities and the derived [`Connection`] views
//! to draw the graph.

pub mod connection;
pub mod graph;
pub mod node;
pub mod param;
pub mod port;

pub use connection::Connection;
pub use graph::{Graph, GraphError};
pub use node::{Node, NodeId, Operation};
pub use param::ParamSlot;
pub use port::{PortDirection, PortRef};
