// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::id::{LinkId, PinId};

/// A directed edge between two pins.
///
/// By convention `start` is an output pin and `end` an input pin. A link
/// does not own its pins and does not check that they exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Unique link ID
    pub id: LinkId,
    /// Start pin (typically an output)
    pub start: PinId,
    /// End pin (typically an input)
    pub end: PinId,
}

impl Link {
    /// Create a new link with a fresh ID
    pub fn new(start: PinId, end: PinId) -> Self {
        Self::with_id(LinkId::new(), start, end)
    }

    /// Create a link with a caller-chosen ID
    pub fn with_id(id: LinkId, start: PinId, end: PinId) -> Self {
        Self { id, start, end }
    }

    /// Check if this link touches a specific pin
    pub fn involves_pin(&self, pin_id: PinId) -> bool {
        self.start == pin_id || self.end == pin_id
    }
}
