//! Recipe graph pipeline.
//!
//! Turns flat recipe rows into a graph that a force-directed renderer can
//! draw directly:
//! - Material and recipe nodes with typed input/output links
//! - Optional invisible layout links between related recipes
//! - Clustering of nodes with identical connections
//! - Precomputed link opacity that fades links around hubs
//! - Connection, depth, highlight and detail queries for the view layer
//!
//! # Example
//!
//! ```
//! use recipe_graph::{GraphConfig, RecipeGraph, RecipeRow};
//!
//! let rows = vec![
//!     RecipeRow::new("R1").building("Smelter").input("Ore", 2).output("Ingot", 1),
//! ];
//! let graph = RecipeGraph::from_rows(&rows, &GraphConfig::default());
//!
//! assert_eq!(graph.data().nodes.len(), 3);
//! assert_eq!(graph.depth("Ingot"), 2);
//! ```

mod builder;
mod cluster;
mod details;
mod highlight;
mod metrics;
mod opacity;
mod pipeline;
mod rows;
pub mod theme;
mod types;

pub use builder::{BuildOptions, build_graph};
pub use cluster::{ClusterOptions, Signature, cluster_id, cluster_nodes, signatures};
pub use details::{ItemQty, NodeDetails, details, locate};
pub use highlight::Highlight;
pub use metrics::{Connections, Depths, connections, depths};
pub use opacity::{LinkWeights, precompute_opacity};
pub use pipeline::{GraphConfig, RecipeGraph};
pub use rows::{ItemSlot, MAX_SLOTS, RecipeRow, parse_quantity, parse_rows};
pub use theme::Theme;
pub use types::{
	CLUSTER_ID_PREFIX, ClusterNode, GraphData, GraphLink, GraphNode, LinkKind, MaterialNode,
	NodeKind, RECIPE_ID_PREFIX, RecipeNode, recipe_node_id,
};
