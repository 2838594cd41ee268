// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph.

use crate::id::{NodeId, PinId};
use crate::pin::{Pin, PinDirection, PinType};
use indexmap::IndexMap;
use std::ops::{Add, Div, Mul, Sub};

/// Node category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Execution entry points (e.g. `OnBeginPlay`)
    ExecutionFlow,
    /// Loops and conditionals
    ControlFlow,
    /// Actions and calculations, possibly user-defined
    Function,
    /// Stored values
    Variable,
    /// Math and logic operators
    Operator,
}

/// Position of a node in editor grid space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Position {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f32; 2] {
    fn from(p: Position) -> Self {
        [p.x, p.y]
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Position {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f32> for Position {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

/// A node instance in the graph.
///
/// Pins are kept in insertion order so the editor lays them out the same way
/// every frame, while lookups by [`PinId`] stay O(1). Pins are never removed
/// individually; they go away with the node. The ID is fixed at
/// construction: the graph indexes nodes by it and every pin records it as
/// its owner.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Position in the editor grid
    pub position: Position,
    inputs: IndexMap<PinId, Pin>,
    outputs: IndexMap<PinId, Pin>,
}

impl Node {
    /// Create a new node with a fresh ID and no pins
    pub fn new(name: impl Into<String>, category: NodeCategory) -> Self {
        Self::with_id(NodeId::new(), name, category)
    }

    /// Create a node with a caller-chosen ID
    pub fn with_id(id: NodeId, name: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            position: Position::default(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
        }
    }

    /// Unique instance ID. Read-only once the node exists:
    ///
    /// ```compile_fail
    /// use mindweaver_graph::{Node, NodeCategory, NodeId};
    ///
    /// let mut node = Node::new("Var", NodeCategory::Variable);
    /// node.id = NodeId::new();
    /// ```
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Add an input pin with a fresh ID
    pub fn add_input_pin(&mut self, name: impl Into<String>, pin_type: PinType) -> &Pin {
        self.add_pin(name, pin_type, PinDirection::Input)
    }

    /// Add an output pin with a fresh ID
    pub fn add_output_pin(&mut self, name: impl Into<String>, pin_type: PinType) -> &Pin {
        self.add_pin(name, pin_type, PinDirection::Output)
    }

    fn add_pin(&mut self, name: impl Into<String>, pin_type: PinType, direction: PinDirection) -> &Pin {
        let pin = Pin::new(PinId::new(), name, pin_type, direction, self.id);
        let pins = match direction {
            PinDirection::Input => &mut self.inputs,
            PinDirection::Output => &mut self.outputs,
        };
        pins.entry(pin.id()).or_insert(pin)
    }

    /// Overwrite the stored position
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Get an input pin by ID (outputs are not searched)
    pub fn input_pin(&self, pin_id: PinId) -> Option<&Pin> {
        self.inputs.get(&pin_id)
    }

    /// Get an output pin by ID (inputs are not searched)
    pub fn output_pin(&self, pin_id: PinId) -> Option<&Pin> {
        self.outputs.get(&pin_id)
    }

    /// Get a pin by ID from either collection
    pub fn pin(&self, pin_id: PinId) -> Option<&Pin> {
        self.input_pin(pin_id).or_else(|| self.output_pin(pin_id))
    }

    /// Whether this node owns the given pin
    pub fn owns_pin(&self, pin_id: PinId) -> bool {
        self.inputs.contains_key(&pin_id) || self.outputs.contains_key(&pin_id)
    }

    /// Input pins in insertion order
    pub fn input_pins(&self) -> impl Iterator<Item = &Pin> {
        self.inputs.values()
    }

    /// Output pins in insertion order
    pub fn output_pins(&self) -> impl Iterator<Item = &Pin> {
        self.outputs.values()
    }

    /// All pins, inputs first
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.input_pins().chain(self.output_pins())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_pins_sets_owner_and_direction() {
        let mut node = Node::new("Add", NodeCategory::Operator);
        let a = node.add_input_pin("A", PinType::Float).clone();
        let out = node.add_output_pin("Sum", PinType::Float).clone();

        assert_eq!(a.owner(), node.id());
        assert_eq!(a.direction(), PinDirection::Input);
        assert_eq!(out.owner(), node.id());
        assert_eq!(out.direction(), PinDirection::Output);

        assert_eq!(node.input_pin(a.id()), Some(&a));
        assert_eq!(node.output_pin(out.id()), Some(&out));
    }

    #[test]
    fn test_pin_lookup_respects_direction() {
        let mut node = Node::new("Branch", NodeCategory::ControlFlow);
        let input = node.add_input_pin("Condition", PinType::Bool).id();
        let output = node.add_output_pin("True", PinType::Exec).id();

        assert!(node.output_pin(input).is_none());
        assert!(node.input_pin(output).is_none());
        assert_eq!(node.pin(input).map(Pin::name), Some("Condition"));
        assert_eq!(node.pin(output).map(Pin::name), Some("True"));
    }

    #[test]
    fn test_pin_order_is_insertion_order() {
        let mut node = Node::new("Process Data", NodeCategory::Function);
        for name in ["Exec In", "Input Value", "Scale", "Offset"] {
            node.add_input_pin(name, PinType::Int);
        }
        let names: Vec<_> = node.input_pins().map(Pin::name).collect();
        assert_eq!(names, ["Exec In", "Input Value", "Scale", "Offset"]);
    }

    #[test]
    fn test_set_position_overwrites() {
        let mut node = Node::new("Var", NodeCategory::Variable).with_position(1.0, 2.0);
        node.set_position(Position::new(-5.0, 7.5));
        assert_eq!(node.position, Position::new(-5.0, 7.5));
    }

    #[test]
    fn test_position_arithmetic() {
        let a = Position::new(4.0, 6.0);
        let b = Position::new(1.0, 2.0);
        assert_eq!(a + b, Position::new(5.0, 8.0));
        assert_eq!(a - b, Position::new(3.0, 4.0));
        assert_eq!(a * 0.5, Position::new(2.0, 3.0));
        assert_eq!(a / 2.0, Position::new(2.0, 3.0));
    }
}
