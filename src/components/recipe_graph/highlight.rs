//! Hover and selection emphasis.
//!
//! A [`Highlight`] captures the hovered and selected node plus their visible
//! neighborhoods, and answers per-node and per-link opacity queries from it.
//! Renderers rebuild it whenever hover or selection changes; the graph itself
//! is never touched.

use std::collections::HashSet;

use super::theme::Theme;
use super::types::{GraphData, GraphLink, GraphNode};

/// A focused node and the nodes one visible link away from it.
#[derive(Clone, Debug)]
struct Focus<'a> {
	id: Option<&'a str>,
	neighbors: HashSet<&'a str>,
}

impl<'a> Focus<'a> {
	fn new(data: &'a GraphData, id: Option<&'a str>) -> Self {
		let mut neighbors = HashSet::new();
		if let Some(id) = id {
			for link in data.visible_links() {
				if link.source == id {
					neighbors.insert(link.target.as_str());
				} else if link.target == id {
					neighbors.insert(link.source.as_str());
				}
			}
		}
		Self { id, neighbors }
	}

	fn is(&self, id: &str) -> bool {
		self.id == Some(id)
	}

	fn touches(&self, link: &GraphLink) -> bool {
		self.id.is_some_and(|id| link.touches(id))
	}
}

/// Current hover/selection state of a view over one graph.
#[derive(Clone, Debug)]
pub struct Highlight<'a> {
	hovered: Focus<'a>,
	selected: Focus<'a>,
}

impl<'a> Highlight<'a> {
	/// Captures the neighborhoods of `hovered` and `selected` in `data`.
	pub fn new(data: &'a GraphData, hovered: Option<&'a str>, selected: Option<&'a str>) -> Self {
		Self {
			hovered: Focus::new(data, hovered),
			selected: Focus::new(data, selected),
		}
	}

	/// Whether anything is hovered or selected.
	pub fn is_active(&self) -> bool {
		self.hovered.id.is_some() || self.selected.id.is_some()
	}

	/// Opacity level of a node before any per-kind scaling.
	fn node_level(&self, id: &str, theme: &Theme) -> f64 {
		let levels = &theme.highlight;
		if self.selected.is(id) {
			return levels.full;
		}
		let focus = match (&self.hovered.id, &self.selected.id) {
			(Some(_), _) => &self.hovered,
			(None, Some(_)) => &self.selected,
			(None, None) => return levels.full,
		};
		if focus.is(id) || focus.neighbors.contains(id) {
			levels.full
		} else {
			levels.dimmed
		}
	}

	/// Opacity of a node. Clusters are scaled by the cluster base opacity.
	pub fn node_opacity(&self, node: &GraphNode, theme: &Theme) -> f64 {
		let level = self.node_level(node.id(), theme);
		match node {
			GraphNode::Cluster(_) => {
				if self.selected.is(node.id()) || self.hovered.is(node.id()) {
					theme.nodes.cluster.opacity
				} else {
					level * theme.nodes.cluster.opacity
				}
			}
			_ => level,
		}
	}

	/// Opacity of a link, falling back to its precomputed resting opacity.
	pub fn link_opacity(&self, link: &GraphLink, theme: &Theme) -> f64 {
		if !link.is_visible() {
			return 0.0;
		}
		if self.selected.touches(link) || self.hovered.touches(link) {
			return theme.highlight.full;
		}
		if self.is_active() {
			return theme.highlight.faded;
		}
		link.computed_opacity.unwrap_or(theme.links.opacity)
	}

	/// Stroke width of a link.
	pub fn link_width(&self, link: &GraphLink, theme: &Theme) -> f64 {
		let widths = &theme.links.width;
		if !link.is_visible() {
			widths.default
		} else if self.selected.touches(link) || self.hovered.touches(link) {
			widths.highlighted
		} else {
			widths.normal
		}
	}
}
