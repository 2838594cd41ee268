// SPDX-License-Identifier: MIT OR Apache-2.0
//! `MindWeaver` - visual node graph editor.
//!
//! Opens a window with a single node editor panel bound to the demo graph.
//! Configuration is read from the RON file given as the first argument, or
//! from `mindweaver.ron` in the working directory.

mod app;

use app::MindWeaverApp;
use mindweaver_editor::config::{EditorConfig, CONFIG_FILE_NAME};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), PathBuf::from);
    let loaded = EditorConfig::load_or_default(&config_path);
    let config = loaded.as_ref().map_or_else(|_| EditorConfig::default(), Clone::clone);

    // RUST_LOG wins over the configured filter
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = &loaded {
        tracing::warn!("Ignoring {}: {e}", config_path.display());
    }

    tracing::info!("Starting MindWeaver v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = MindWeaverApp::run(config) {
        tracing::error!("Editor crashed: {e}");
        std::process::exit(1);
    }
}
