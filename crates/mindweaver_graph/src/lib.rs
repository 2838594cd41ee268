// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data model for the `MindWeaver` visual scripting editor.
//!
//! ## Architecture
//!
//! The model is passive state owned by the hosting session:
//! - [`Graph`] owns nodes and links, in insertion order, with O(1) lookup
//! - [`Node`] owns its input and output [`Pin`]s
//! - [`Link`] is a directed edge between two pin IDs
//! - every element is addressed by a random 128-bit [`Identifier`]
//!
//! Removing a node cascades to every link touching one of its pins.

pub mod graph;
pub mod id;
pub mod link;
pub mod node;
pub mod pin;

pub use graph::Graph;
pub use id::{Identifier, LinkId, NodeId, PinId};
pub use link::Link;
pub use node::{Node, NodeCategory, Position};
pub use pin::{Pin, PinDirection, PinType};
