// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bidirectional mapping between graph identifiers and widget integers.
//!
//! The draw phase registers every node, pin and link it emits, together
//! with its role. Resolution of widget reports is then a direct lookup, and
//! two graph elements never share a widget integer: when the hashed
//! projection of an identifier is already taken, the next free integer is
//! used instead.

use crate::error::{EditorError, Result};
use crate::widget::WidgetId;
use mindweaver_graph::{Identifier, LinkId, NodeId, PinId};
use std::collections::{HashMap, HashSet};

/// What a widget integer denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetRole {
    /// A node
    Node(NodeId),
    /// An input pin and its owning node
    InputPin {
        /// Pin ID
        pin: PinId,
        /// Owning node
        node: NodeId,
    },
    /// An output pin and its owning node
    OutputPin {
        /// Pin ID
        pin: PinId,
        /// Owning node
        node: NodeId,
    },
    /// A link
    Link(LinkId),
}

impl WidgetRole {
    /// The graph identifier behind this role
    pub fn identifier(&self) -> Identifier {
        match self {
            Self::Node(id) => id.identifier(),
            Self::InputPin { pin, .. } | Self::OutputPin { pin, .. } => pin.identifier(),
            Self::Link(id) => id.identifier(),
        }
    }
}

/// Widget integer <-> identifier map, rebuilt by each draw phase.
///
/// Entries drawn in consecutive frames keep their integer.
#[derive(Debug, Default)]
pub struct WidgetIdMap {
    roles: HashMap<WidgetId, WidgetRole>,
    widgets: HashMap<Identifier, WidgetId>,
    drawn: HashSet<WidgetId>,
}

impl WidgetIdMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a draw phase
    pub fn begin_frame(&mut self) {
        self.drawn.clear();
    }

    /// Register an element drawn this frame and return its widget integer
    pub fn register(&mut self, role: WidgetRole) -> WidgetId {
        let identifier = role.identifier();
        let widget = match self.widgets.get(&identifier) {
            Some(&widget) => widget,
            None => {
                let mut candidate = identifier.to_widget_int();
                while self.roles.contains_key(&candidate) {
                    candidate = candidate.wrapping_add(1);
                }
                if candidate != identifier.to_widget_int() {
                    tracing::debug!("Widget id collision for {identifier}, using {candidate}");
                }
                self.widgets.insert(identifier, candidate);
                candidate
            }
        };
        self.roles.insert(widget, role);
        self.drawn.insert(widget);
        widget
    }

    /// End a draw phase, forgetting elements that were not drawn
    pub fn sweep(&mut self) {
        let drawn = &self.drawn;
        self.roles.retain(|widget, _| drawn.contains(widget));
        self.widgets.retain(|_, widget| drawn.contains(widget));
    }

    /// Forget everything (graph rebind)
    pub fn clear(&mut self) {
        self.roles.clear();
        self.widgets.clear();
        self.drawn.clear();
    }

    /// Role of a widget integer
    pub fn resolve(&self, widget: WidgetId) -> Option<WidgetRole> {
        self.roles.get(&widget).copied()
    }

    /// Widget integer assigned to an identifier
    pub fn widget_id(&self, identifier: Identifier) -> Option<WidgetId> {
        self.widgets.get(&identifier).copied()
    }

    /// Node behind a widget integer
    pub fn node(&self, widget: WidgetId) -> Option<NodeId> {
        match self.resolve(widget)? {
            WidgetRole::Node(id) => Some(id),
            _ => None,
        }
    }

    /// Link behind a widget integer
    pub fn link(&self, widget: WidgetId) -> Option<LinkId> {
        match self.resolve(widget)? {
            WidgetRole::Link(id) => Some(id),
            _ => None,
        }
    }

    /// Resolve the two attributes of a drawn link into `(output, input)`.
    ///
    /// Either drag direction is accepted; the result is always ordered
    /// output first.
    pub fn link_endpoints(&self, start: WidgetId, end: WidgetId) -> Result<(PinId, PinId)> {
        match (self.resolve(start), self.resolve(end)) {
            (Some(WidgetRole::OutputPin { pin: output, .. }), Some(WidgetRole::InputPin { pin: input, .. }))
            | (Some(WidgetRole::InputPin { pin: input, .. }), Some(WidgetRole::OutputPin { pin: output, .. })) => {
                Ok((output, input))
            }
            _ => Err(EditorError::UnresolvedPins { start, end }),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
