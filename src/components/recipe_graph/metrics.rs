//! Read-only metrics over a built graph: connection counts and depth.
//!
//! Invisible links never count. Both computations are pure functions of the
//! graph and are recomputed from scratch whenever a new graph is built.

use std::collections::{HashMap, HashSet};

use super::types::{GraphData, LinkKind, NodeKind};

/// Per-node visible link counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Connections {
	/// Visible links touching the node.
	pub connections: HashMap<String, usize>,
	/// Incoming `input` links.
	pub inputs: HashMap<String, usize>,
	/// Outgoing `output` links.
	pub outputs: HashMap<String, usize>,
	/// Largest value in `connections`.
	pub max_connections: usize,
	/// Largest value in `inputs`.
	pub max_inputs: usize,
	/// Largest value in `outputs`.
	pub max_outputs: usize,
}

impl Connections {
	/// Total visible connections of a node, 0 for unknown ids.
	pub fn get(&self, id: &str) -> usize {
		self.connections.get(id).copied().unwrap_or(0)
	}

	/// Incoming `input` links of a node.
	pub fn inputs_of(&self, id: &str) -> usize {
		self.inputs.get(id).copied().unwrap_or(0)
	}

	/// Outgoing `output` links of a node.
	pub fn outputs_of(&self, id: &str) -> usize {
		self.outputs.get(id).copied().unwrap_or(0)
	}
}

/// Counts visible connections for every node in the graph.
pub fn connections(data: &GraphData) -> Connections {
	let zeroed = || -> HashMap<String, usize> {
		data.nodes.iter().map(|n| (n.id().to_string(), 0)).collect()
	};
	let (mut connections, mut inputs, mut outputs) = (zeroed(), zeroed(), zeroed());

	for link in data.visible_links() {
		if let Some(c) = connections.get_mut(&link.source) {
			*c += 1;
		}
		if link.target != link.source {
			if let Some(c) = connections.get_mut(&link.target) {
				*c += 1;
			}
		}
		match link.kind {
			LinkKind::Input => {
				if let Some(c) = inputs.get_mut(&link.target) {
					*c += 1;
				}
			}
			LinkKind::Output => {
				if let Some(c) = outputs.get_mut(&link.source) {
					*c += 1;
				}
			}
			LinkKind::Invisible => {}
		}
	}

	let max = |m: &HashMap<String, usize>| m.values().copied().max().unwrap_or(0);
	Connections {
		max_connections: max(&connections),
		max_inputs: max(&inputs),
		max_outputs: max(&outputs),
		connections,
		inputs,
		outputs,
	}
}

/// Minimum hop distance from a root material to each reachable node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Depths {
	/// Depth per reachable node id.
	pub depths: HashMap<String, usize>,
	/// Deepest reachable node, 0 for an empty graph.
	pub max_depth: usize,
}

impl Depths {
	/// Depth of a node, `None` when it is not reachable from any root.
	pub fn get(&self, id: &str) -> Option<usize> {
		self.depths.get(id).copied()
	}

	/// Depth for layout purposes: unreachable nodes sit with the roots.
	pub fn depth_or_zero(&self, id: &str) -> usize {
		self.get(id).unwrap_or(0)
	}
}

/// Assigns every node reachable from a root material its minimum depth.
///
/// Roots are material nodes (or clusters of materials) without visible
/// incoming links. The walk is an explicit stack. Each `(parent, node)`
/// transition is remembered with the depth it delivered and is only taken
/// again when it would deliver a strictly smaller one, which bounds the walk
/// on cyclic graphs while still converging on the minimum.
pub fn depths(data: &GraphData) -> Depths {
	let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
	let mut has_incoming: HashSet<&str> = HashSet::new();
	for link in data.visible_links() {
		adjacency
			.entry(link.source.as_str())
			.or_default()
			.push(link.target.as_str());
		has_incoming.insert(link.target.as_str());
	}

	let mut depths: HashMap<String, usize> = HashMap::new();
	let mut transitions: HashMap<(Option<&str>, &str), usize> = HashMap::new();
	let mut stack: Vec<(Option<&str>, &str, usize)> = data
		.nodes
		.iter()
		.filter(|n| n.effective_kind() == NodeKind::Material && !has_incoming.contains(n.id()))
		.map(|n| (None, n.id(), 0))
		.rev()
		.collect();

	while let Some((parent, node, depth)) = stack.pop() {
		match transitions.get(&(parent, node)) {
			Some(&seen) if seen <= depth => continue,
			_ => {
				transitions.insert((parent, node), depth);
			}
		}

		let best = depths.entry(node.to_string()).or_insert(depth);
		*best = (*best).min(depth);

		if let Some(targets) = adjacency.get(node) {
			stack.extend(targets.iter().rev().map(|&t| (Some(node), t, depth + 1)));
		}
	}

	let max_depth = depths.values().copied().max().unwrap_or(0);
	Depths { depths, max_depth }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::recipe_graph::types::{GraphLink, GraphNode};

	fn chain() -> GraphData {
		// Ore -> smelt -> Ingot -> press -> Plate, plus Ingot -> cut -> Rod
		GraphData {
			nodes: vec![
				GraphNode::material("Ore", None),
				GraphNode::recipe("smelt", "", ""),
				GraphNode::material("Ingot", None),
				GraphNode::recipe("press", "", ""),
				GraphNode::material("Plate", None),
				GraphNode::recipe("cut", "", ""),
				GraphNode::material("Rod", None),
			],
			links: vec![
				GraphLink::input("Ore", "recipe_smelt", 1),
				GraphLink::output("recipe_smelt", "Ingot", 1),
				GraphLink::input("Ingot", "recipe_press", 1),
				GraphLink::output("recipe_press", "Plate", 1),
				GraphLink::input("Ingot", "recipe_cut", 1),
				GraphLink::output("recipe_cut", "Rod", 1),
				GraphLink::invisible("recipe_press", "recipe_cut"),
			],
		}
	}

	#[test]
	fn counts_ignore_invisible_links() {
		let c = connections(&chain());
		assert_eq!(c.get("Ingot"), 3);
		assert_eq!(c.get("recipe_press"), 2);
		assert_eq!(c.inputs_of("recipe_press"), 1);
		assert_eq!(c.outputs_of("recipe_smelt"), 1);
		assert_eq!(c.inputs_of("Ingot"), 0);
		assert_eq!(c.max_connections, 3);
		assert_eq!(c.get("missing"), 0);
	}

	#[test]
	fn empty_graph_has_zero_maxima() {
		let c = connections(&GraphData::default());
		assert_eq!(c.max_connections, 0);
		assert_eq!(depths(&GraphData::default()).max_depth, 0);
	}

	#[test]
	fn depth_follows_chain() {
		let d = depths(&chain());
		assert_eq!(d.get("Ore"), Some(0));
		assert_eq!(d.get("recipe_smelt"), Some(1));
		assert_eq!(d.get("Ingot"), Some(2));
		assert_eq!(d.get("Plate"), Some(4));
		assert_eq!(d.get("Rod"), Some(4));
		assert_eq!(d.max_depth, 4);
	}

	#[test]
	fn depth_takes_shortest_path() {
		// root -> x directly, and root -> a -> b -> x
		let data = GraphData {
			nodes: ["root", "a", "b", "x", "y"]
				.into_iter()
				.map(|id| GraphNode::material(id, None))
				.collect(),
			links: vec![
				GraphLink::input("root", "a", 1),
				GraphLink::input("a", "b", 1),
				GraphLink::input("b", "x", 1),
				GraphLink::input("root", "x", 1),
				GraphLink::input("x", "y", 1),
			],
		};
		let d = depths(&data);
		assert_eq!(d.get("x"), Some(1));
		assert_eq!(d.get("y"), Some(2));
	}

	#[test]
	fn cycles_terminate_and_unreachable_nodes_have_no_depth() {
		let data = GraphData {
			nodes: vec![
				GraphNode::material("Seed", None),
				GraphNode::recipe("grow", "", ""),
				GraphNode::material("Plant", None),
				GraphNode::recipe("loop", "", ""),
				GraphNode::material("Water", None),
				GraphNode::recipe("island", "", ""),
			],
			links: vec![
				GraphLink::input("Seed", "recipe_grow", 1),
				GraphLink::output("recipe_grow", "Plant", 1),
				GraphLink::input("Plant", "recipe_loop", 1),
				GraphLink::output("recipe_loop", "Plant", 1),
				GraphLink::output("recipe_island", "Water", 1),
				GraphLink::input("Water", "recipe_island", 1),
			],
		};
		let d = depths(&data);
		assert_eq!(d.get("Plant"), Some(2));
		assert_eq!(d.get("recipe_loop"), Some(3));
		assert_eq!(d.get("Water"), None);
		assert_eq!(d.depth_or_zero("Water"), 0);
	}
}
