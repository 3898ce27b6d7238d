//! Precomputes the resting opacity of every link.
//!
//! Links touching highly connected hubs fade so that sparse paths stand out.
//! The value only depends on the graph and the weights, never on view state.

use super::metrics::connections;
use super::types::GraphData;

/// Parameters of the opacity falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkWeights {
	/// Opacity of a link between two unconnected nodes.
	pub base_opacity: f64,
	/// Subtracted once per connection of either endpoint.
	pub hub_falloff: f64,
	/// Floor for visible links.
	pub min_opacity: f64,
}

impl Default for LinkWeights {
	fn default() -> Self {
		Self {
			base_opacity: 0.6,
			hub_falloff: 0.01,
			min_opacity: 0.1,
		}
	}
}

impl LinkWeights {
	/// Opacity of a visible link whose endpoints have the given connection counts.
	pub fn opacity(&self, source_connections: usize, target_connections: usize) -> f64 {
		let hubness = (source_connections + target_connections) as f64;
		(self.base_opacity - self.hub_falloff * hubness).max(self.min_opacity)
	}
}

/// Sets `computed_opacity` on every link. Invisible links get 0.
pub fn precompute_opacity(mut data: GraphData, weights: &LinkWeights) -> GraphData {
	let counts = connections(&data);
	for link in &mut data.links {
		link.computed_opacity = Some(if link.is_visible() {
			weights.opacity(counts.get(&link.source), counts.get(&link.target))
		} else {
			0.0
		});
	}
	data
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::recipe_graph::types::{GraphLink, GraphNode};

	#[test]
	fn falloff_and_floor() {
		let w = LinkWeights::default();
		assert!((w.opacity(1, 1) - 0.58).abs() < 1e-9);
		assert!((w.opacity(10, 20) - 0.3).abs() < 1e-9);
		assert_eq!(w.opacity(40, 40), 0.1);
	}

	#[test]
	fn invisible_links_are_transparent() {
		let data = GraphData {
			nodes: vec![
				GraphNode::material("Ore", None),
				GraphNode::recipe("a", "", ""),
				GraphNode::recipe("b", "", ""),
			],
			links: vec![
				GraphLink::input("Ore", "recipe_a", 1),
				GraphLink::input("Ore", "recipe_b", 1),
				GraphLink::invisible("recipe_a", "recipe_b"),
			],
		};
		let data = precompute_opacity(data, &LinkWeights::default());
		// Ore has 2 connections, each recipe 1.
		assert!((data.links[0].computed_opacity.unwrap() - 0.57).abs() < 1e-9);
		assert_eq!(data.links[2].computed_opacity, Some(0.0));
	}
}
