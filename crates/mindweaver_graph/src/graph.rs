// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and links.

use crate::id::{LinkId, NodeId, PinId};
use crate::link::Link;
use crate::node::Node;
use crate::pin::Pin;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A node graph: the single source of truth for one editing session.
///
/// Nodes and links are kept in insertion order with O(1) lookup by ID.
/// Removing a node removes every link touching one of its pins.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    nodes: IndexMap<NodeId, Node>,
    links: IndexMap<LinkId, Link>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// Graph name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a node to the graph.
    ///
    /// A node whose ID is already present replaces the existing entry in place.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and every link touching its pins
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&node_id)?;
        self.remove_dangling_links();
        Some(removed)
    }

    /// Drop links with an endpoint that no longer resolves to a live node.
    fn remove_dangling_links(&mut self) {
        // First owner in insertion order wins, matching `node_owning_pin`
        let mut owners: HashMap<PinId, NodeId> = HashMap::new();
        for node in self.nodes.values() {
            for pin in node.pins() {
                owners.entry(pin.id()).or_insert(node.id());
            }
        }
        self.links
            .retain(|_, link| owners.contains_key(&link.start) && owners.contains_key(&link.end));
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Whether a node with this ID is in the graph
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// First node, in insertion order, owning the given pin
    pub fn node_owning_pin(&self, pin_id: PinId) -> Option<&Node> {
        self.nodes.values().find(|node| node.owns_pin(pin_id))
    }

    /// Look up a pin anywhere in the graph
    pub fn pin(&self, pin_id: PinId) -> Option<&Pin> {
        self.node_owning_pin(pin_id).and_then(|node| node.pin(pin_id))
    }

    /// Add a link.
    ///
    /// Endpoints are not validated: no type or cardinality checks are made.
    pub fn add_link(&mut self, link: Link) -> LinkId {
        let id = link.id;
        self.links.insert(id, link);
        id
    }

    /// Remove a link
    pub fn remove_link(&mut self, link_id: LinkId) -> Option<Link> {
        self.links.shift_remove(&link_id)
    }

    /// Get a link by ID
    pub fn link(&self, link_id: LinkId) -> Option<&Link> {
        self.links.get(&link_id)
    }

    /// Get all links in insertion order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get links touching a specific pin
    pub fn links_for_pin(&self, pin_id: PinId) -> impl Iterator<Item = &Link> {
        self.links.values().filter(move |l| l.involves_pin(pin_id))
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
