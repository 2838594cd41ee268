// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin definitions for node inputs/outputs.

use crate::id::{NodeId, PinId};

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinDirection {
    /// Input pin (receives data or execution)
    Input,
    /// Output pin (sends data or execution)
    Output,
}

/// Kind of data or control carried by a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinType {
    /// Execution flow (orders execution between nodes)
    Exec,
    /// Integer value
    Int,
    /// Floating point value
    Float,
    /// Boolean value
    Bool,
    /// String value
    String,
    /// Vector value
    Vector,
    /// Class/object reference
    Class,
}

/// A typed, directional connection point owned by exactly one node.
///
/// Pins are only created through [`Node::add_input_pin`] and
/// [`Node::add_output_pin`]; identity, direction and owner are fixed for
/// the pin's lifetime.
///
/// [`Node::add_input_pin`]: crate::node::Node::add_input_pin
/// [`Node::add_output_pin`]: crate::node::Node::add_output_pin
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    id: PinId,
    name: String,
    pin_type: PinType,
    direction: PinDirection,
    owner: NodeId,
}

impl Pin {
    pub(crate) fn new(
        id: PinId,
        name: impl Into<String>,
        pin_type: PinType,
        direction: PinDirection,
        owner: NodeId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pin_type,
            direction,
            owner,
        }
    }

    /// Unique pin ID
    pub fn id(&self) -> PinId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Data type
    pub fn pin_type(&self) -> PinType {
        self.pin_type
    }

    /// Pin direction
    pub fn direction(&self) -> PinDirection {
        self.direction
    }

    /// ID of the node that owns this pin
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Whether this is an input pin
    pub fn is_input(&self) -> bool {
        self.direction == PinDirection::Input
    }

    /// Whether this is an output pin
    pub fn is_output(&self) -> bool {
        self.direction == PinDirection::Output
    }
}
