// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interface to the immediate-mode node widget layer.
//!
//! The widget layer keeps no model state between frames and addresses
//! nodes, attributes and links by small integers. Each frame the editor
//! panel replays the graph through [`NodeWidgets`] and then queries the
//! interactions the user performed.

use crate::error::{EditorError, Result};
use std::cell::Cell;
use std::marker::PhantomData;

/// Integer identity used by the widget layer
pub type WidgetId = i32;

thread_local! {
    static CONTEXT_LIVE: Cell<bool> = const { Cell::new(false) };
}

/// Ownership of the single widget context allowed per thread.
///
/// Released exactly once, on drop. Not `Send`: the context belongs to the
/// thread that owns the window.
#[derive(Debug)]
pub struct ContextToken {
    _not_send: PhantomData<*const ()>,
}

impl ContextToken {
    /// Claim the widget context for the current thread
    pub fn acquire() -> Result<Self> {
        CONTEXT_LIVE.with(|live| {
            if live.replace(true) {
                return Err(EditorError::ContextAlreadyLive);
            }
            tracing::info!("Node editor context created");
            Ok(Self {
                _not_send: PhantomData,
            })
        })
    }

    /// Whether the current thread holds a context
    pub fn is_live() -> bool {
        CONTEXT_LIVE.with(Cell::get)
    }
}

impl Drop for ContextToken {
    fn drop(&mut self) {
        CONTEXT_LIVE.with(|live| live.set(false));
        tracing::info!("Node editor context destroyed");
    }
}

/// An immediate-mode node editor widget layer.
///
/// Calls within a frame are strictly ordered: `begin_frame`, then node and
/// link draw calls, then `end_frame`, then the interaction queries. Query
/// results describe the frame that just ended.
pub trait NodeWidgets: Sized {
    /// Drawing surface handed in by the host each frame
    type Surface;

    /// Create the widget context. Fails if one is already live.
    fn create_context() -> Result<Self>;

    /// Draw a message instead of the editor (no graph bound)
    fn placeholder(&mut self, surface: &mut Self::Surface, text: &str);

    /// Start a frame
    fn begin_frame(&mut self, surface: &mut Self::Surface);

    /// Move a node to a grid-space position before it is drawn
    fn place_node(&mut self, node: WidgetId, x: f32, y: f32);

    /// Begin a node
    fn begin_node(&mut self, node: WidgetId);

    /// Title of the current node
    fn node_title(&mut self, title: &str);

    /// End the current node
    fn end_node(&mut self);

    /// Begin an input attribute on the current node
    fn begin_input_attr(&mut self, attr: WidgetId);

    /// End the current input attribute
    fn end_input_attr(&mut self);

    /// Begin an output attribute on the current node
    fn begin_output_attr(&mut self, attr: WidgetId);

    /// End the current output attribute
    fn end_output_attr(&mut self);

    /// Label of the current attribute
    fn attr_label(&mut self, label: &str);

    /// Draw a link between two attributes
    fn draw_link(&mut self, link: WidgetId, from: WidgetId, to: WidgetId);

    /// Finish the frame: lay out, paint and process input
    fn end_frame(&mut self, surface: &mut Self::Surface);

    /// A link the user drew this frame, as (drag start, drag end)
    fn link_created(&mut self) -> Option<(WidgetId, WidgetId)>;

    /// A link the user destroyed this frame
    fn link_destroyed(&mut self) -> Option<WidgetId>;

    /// Currently selected nodes
    fn selected_nodes(&self) -> Vec<WidgetId>;

    /// Grid-space position of a node
    fn node_position(&self, node: WidgetId) -> Option<[f32; 2]>;

    /// Nodes the user asked to delete this frame
    fn nodes_deleted(&mut self) -> Vec<WidgetId>;
}
