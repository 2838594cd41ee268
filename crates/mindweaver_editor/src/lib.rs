// SPDX-License-Identifier: MIT OR Apache-2.0
//! `MindWeaver` node editor.
//!
//! Reconciles a [`mindweaver_graph::Graph`] with an immediate-mode node
//! widget layer. Each frame [`NodeEditorPanel::render`] draws the bound
//! graph and then applies what the user did in that frame:
//!
//! - drawn links become graph links
//! - destroyed links are removed
//! - moved nodes write their position back
//! - deleted nodes are removed together with their links
//!
//! The widget layer sits behind [`NodeWidgets`]; [`EguiNodes`] draws it with
//! egui.

pub mod config;
pub mod demo;
pub mod egui_nodes;
pub mod error;
pub mod id_map;
pub mod panel;
pub mod widget;

#[cfg(test)]
mod scripted;

pub use config::{CanvasConfig, EditorConfig};
pub use egui_nodes::EguiNodes;
pub use error::{EditorError, Result};
pub use id_map::{WidgetIdMap, WidgetRole};
pub use panel::NodeEditorPanel;
pub use widget::{ContextToken, NodeWidgets, WidgetId};
