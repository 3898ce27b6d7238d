//! recipe-graph: Turns crafting recipe exports into explorable graphs.
//!
//! This crate converts flat recipe rows into material/recipe nodes and typed
//! links, collapses structurally identical nodes into clusters, and
//! precomputes link opacities and graph metrics for a force-directed
//! renderer. On wasm32 it also exposes the pipeline to JavaScript.

pub mod components;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use components::recipe_graph::{
	BuildOptions, ClusterOptions, GraphConfig, GraphData, GraphLink, GraphNode, LinkKind, NodeKind,
	RecipeGraph, RecipeRow, Theme,
};
pub use error::{GraphError, Result};

/// Initialize logging and panic hooks for the WASM target.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
	let _ = console_log::init_with_level(log::Level::Debug);
	console_error_panic_hook::set_once();
	log::info!("recipe-graph: logging initialized");
}
