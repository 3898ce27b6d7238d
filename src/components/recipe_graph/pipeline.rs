//! The full rows-to-graph pipeline and its configuration.

use std::cell::OnceCell;

use log::info;
use serde::Deserialize;

use super::builder::{BuildOptions, build_graph};
use super::cluster::{ClusterOptions, cluster_nodes};
use super::details::{NodeDetails, details, locate};
use super::highlight::Highlight;
use super::metrics::{Connections, Depths, connections, depths};
use super::opacity::precompute_opacity;
use super::rows::{RecipeRow, parse_rows};
use super::theme::Theme;
use super::types::{GraphData, GraphNode};
use crate::error::Result;

/// Everything that shapes a pipeline run.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Graph construction switches.
	pub build: BuildOptions,
	/// Clustering switches.
	pub cluster: ClusterOptions,
	/// Link weights, highlight levels and renderer styling.
	pub theme: Theme,
}

impl GraphConfig {
	/// Reads a config document. Missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// A processed recipe graph: built, clustered and weighted.
///
/// Immutable once constructed. Metrics are computed on first use and cached;
/// reloading a dataset means building a new `RecipeGraph`.
#[derive(Debug)]
pub struct RecipeGraph {
	data: GraphData,
	theme: Theme,
	connections: OnceCell<Connections>,
	depths: OnceCell<Depths>,
}

impl RecipeGraph {
	/// Runs build, clustering and opacity precomputation over `rows`.
	pub fn from_rows(rows: &[RecipeRow], config: &GraphConfig) -> Self {
		let built = build_graph(rows, &config.build);
		info!(
			"recipe-graph: built {} nodes, {} links from {} rows",
			built.nodes.len(),
			built.links.len(),
			rows.len()
		);
		let clustered = cluster_nodes(built, &config.cluster);
		let data = precompute_opacity(clustered, &config.theme.link_weights());

		Self {
			data,
			theme: config.theme.clone(),
			connections: OnceCell::new(),
			depths: OnceCell::new(),
		}
	}

	/// Parses a JSON array of rows and runs the pipeline over it.
	pub fn from_json(rows_json: &str, config: &GraphConfig) -> Result<Self> {
		let rows = parse_rows(rows_json)?;
		Ok(Self::from_rows(&rows, config))
	}

	/// The processed nodes and links.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// The theme the graph was weighted with.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Gives up the graph, dropping cached metrics.
	pub fn into_data(self) -> GraphData {
		self.data
	}

	/// Connection counts, computed on first call.
	pub fn connections(&self) -> &Connections {
		self.connections.get_or_init(|| connections(&self.data))
	}

	/// Depths from the root materials, computed on first call.
	pub fn depths(&self) -> &Depths {
		self.depths.get_or_init(|| depths(&self.data))
	}

	/// Visible connection count of a node.
	pub fn connection_count(&self, id: &str) -> usize {
		self.connections().get(id)
	}

	/// Depth of a node, 0 when it is unreachable from every root.
	pub fn depth(&self, id: &str) -> usize {
		self.depths().depth_or_zero(id)
	}

	/// Detail-panel data for a top-level node.
	pub fn details(&self, id: &str) -> Option<NodeDetails> {
		details(&self.data, id)
	}

	/// The node representing `id`, which may be the cluster that absorbed it.
	pub fn locate(&self, id: &str) -> Option<&GraphNode> {
		locate(&self.data, id)
	}

	/// Opacity and width queries for the given hover and selection.
	pub fn highlight<'a>(&'a self, hovered: Option<&'a str>, selected: Option<&'a str>) -> Highlight<'a> {
		Highlight::new(&self.data, hovered, selected)
	}

	/// Serializes the graph for a renderer.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.data)?)
	}

	/// Serializes the theme so the renderer draws with the same styling.
	pub fn theme_json(&self) -> Result<String> {
		self.theme.to_json()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_reads_partial_json() {
		let config = GraphConfig::from_json(
			r#"{"build": {"linkSameBuilding": false, "sharedItemThreshold": 3}, "cluster": {"clusterOrphans": true}}"#,
		)
		.unwrap();
		assert!(!config.build.link_same_building);
		assert_eq!(config.build.shared_item_threshold, Some(3));
		assert!(config.cluster.cluster_orphans);
		assert_eq!(config.theme, Theme::default());
	}

	#[test]
	fn empty_dataset_gives_empty_graph() {
		let graph = RecipeGraph::from_json("null", &GraphConfig::default()).unwrap();
		assert!(graph.data().is_empty());
		assert_eq!(graph.depths().max_depth, 0);
		assert_eq!(graph.to_json().unwrap(), r#"{"nodes":[],"links":[]}"#);
	}

	#[test]
	fn metric_accessors_answer_for_clustered_graph() {
		// R2 and R2Alt share a signature and collapse into one cluster.
		let rows = [
			RecipeRow::new("R1").input("Ore", 1).output("Ingot", 1),
			RecipeRow::new("R2").input("Ingot", 1).output("Plate", 1),
			RecipeRow::new("R2Alt").input("Ingot", 2).output("Plate", 3),
		];
		let graph = RecipeGraph::from_rows(&rows, &GraphConfig::default());
		let cluster = "cluster_recipe_R2+recipe_R2Alt";
		assert!(graph.data().node(cluster).is_some());
		assert!(graph.data().node("recipe_R2").is_none());

		assert_eq!(graph.depth(cluster), 3);
		assert_eq!(graph.depth("Plate"), 4);
		assert_eq!(graph.connection_count("Ingot"), 2);
		assert_eq!(graph.connection_count(cluster), 2);
		assert_eq!(graph.locate("recipe_R2Alt").map(|n| n.id()), Some(cluster));
		assert_eq!(graph.depth("unknown"), 0);
	}

	#[test]
	fn theme_json_reflects_configured_theme() {
		let config =
			GraphConfig::from_json(r#"{"theme": {"nodes": {"material": {"radius": 5}}}}"#).unwrap();
		let graph = RecipeGraph::from_rows(&[], &config);
		let theme: Theme = serde_json::from_str(&graph.theme_json().unwrap()).unwrap();
		assert_eq!(theme.nodes.material.radius, 5.0);
		assert_eq!(&theme, graph.theme());
	}
}
