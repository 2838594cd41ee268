// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.
//!
//! Settings are read from a RON file; every field is optional and falls
//! back to its default. Graph content is never stored here.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "mindweaver.ron";

/// Node canvas settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Draw the background grid
    pub show_grid: bool,
    /// Grid spacing in points
    pub grid_spacing: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_spacing: 20.0,
        }
    }
}

/// Editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Node editor panel name
    pub panel_name: String,
    /// Default log filter, used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Open the sample graph on startup
    pub load_demo_graph: bool,
    /// Canvas settings
    pub canvas: CanvasConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: "MindWeaver".to_string(),
            width: 1280,
            height: 720,
            panel_name: "Node Editor".to_string(),
            log_filter: "info,mindweaver_editor=debug,wgpu=warn,naga=warn".to_string(),
            load_demo_graph: true,
            canvas: CanvasConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse configuration from RON text
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Load configuration, or use defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
