// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the node editor.

use crate::widget::WidgetId;
use thiserror::Error;

/// Node editor errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// A widget context already exists on this thread
    #[error("A node editor context is already live on this thread")]
    ContextAlreadyLive,

    /// A widget id that was not drawn as a node this frame
    #[error("Widget id {0} does not denote a live node")]
    UnknownNode(WidgetId),

    /// A drawn link whose attributes are not one output and one input
    #[error("Attributes {start} and {end} do not resolve to an output/input pin pair")]
    UnresolvedPins {
        /// Attribute where the drag started
        start: WidgetId,
        /// Attribute where the drag ended
        end: WidgetId,
    },

    /// A destroyed link that is not in the graph
    #[error("No link with widget id {0} in the graph")]
    UnknownLink(WidgetId),

    /// The bound graph is already borrowed elsewhere
    #[error("Graph is busy")]
    GraphBusy,

    /// Malformed configuration file
    #[error("Invalid configuration: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
