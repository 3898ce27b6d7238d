//! Converts recipe rows into material/recipe nodes and typed links.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Deserialize;

use super::rows::RecipeRow;
use super::types::{GraphData, GraphLink, GraphNode, recipe_node_id};

/// Which layout-only links to add between recipes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
	/// Link every pair of recipes made in the same building.
	pub link_same_building: bool,
	/// Link recipe pairs sharing at least this many distinct items.
	pub shared_item_threshold: Option<usize>,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self {
			link_same_building: true,
			shared_item_threshold: None,
		}
	}
}

impl BuildOptions {
	/// Only input/output links, no layout hints.
	pub fn plain() -> Self {
		Self {
			link_same_building: false,
			shared_item_threshold: None,
		}
	}
}

/// What the invisible-link pass needs to know about a recipe.
struct RecipeSummary {
	node_id: String,
	building: String,
	items: HashSet<String>,
}

/// Node list that keeps first-insertion order and allows lookup by id.
#[derive(Default)]
struct NodeSet {
	nodes: Vec<GraphNode>,
	index: HashMap<String, usize>,
}

impl NodeSet {
	/// Inserts unless a node with the same id exists. First occurrence wins.
	fn insert_new(&mut self, node: GraphNode) {
		if !self.index.contains_key(node.id()) {
			self.index.insert(node.id().to_string(), self.nodes.len());
			self.nodes.push(node);
		}
	}

	/// Inserts or replaces in place, keeping the original position.
	fn upsert(&mut self, node: GraphNode) {
		match self.index.get(node.id()) {
			Some(&i) => self.nodes[i] = node,
			None => {
				self.index.insert(node.id().to_string(), self.nodes.len());
				self.nodes.push(node);
			}
		}
	}
}

/// Builds the recipe graph from raw rows.
///
/// Nodes appear in order of first occurrence: for each row its input
/// materials, its output materials, then the recipe itself. Links keep row
/// order, inputs before outputs, with any invisible links appended last.
pub fn build_graph(rows: &[RecipeRow], options: &BuildOptions) -> GraphData {
	let mut nodes = NodeSet::default();
	let mut links = Vec::new();
	let mut summaries: Vec<RecipeSummary> = Vec::new();
	let mut summary_index: HashMap<String, usize> = HashMap::new();

	for row in rows {
		if !row.is_valid() {
			debug!("recipe-graph: skipping row without RecipeId");
			continue;
		}

		for slot in row.valid_inputs().chain(row.valid_outputs()) {
			nodes.insert_new(GraphNode::material(&slot.name, slot.icon.clone()));
		}

		let recipe_id = recipe_node_id(&row.recipe_id);
		nodes.upsert(GraphNode::recipe(&row.recipe_id, &row.building, &row.time));

		links.extend(
			row.valid_inputs()
				.map(|slot| GraphLink::input(&slot.name, &recipe_id, slot.qty)),
		);
		links.extend(
			row.valid_outputs()
				.map(|slot| GraphLink::output(&recipe_id, &slot.name, slot.qty)),
		);

		let summary = RecipeSummary {
			node_id: recipe_id.clone(),
			building: row.building.clone(),
			items: row
				.valid_inputs()
				.chain(row.valid_outputs())
				.map(|s| s.name.clone())
				.collect(),
		};
		match summary_index.get(&recipe_id) {
			Some(&i) => summaries[i] = summary,
			None => {
				summary_index.insert(recipe_id, summaries.len());
				summaries.push(summary);
			}
		}
	}

	links.extend(invisible_links(&summaries, options));

	GraphData {
		nodes: nodes.nodes,
		links,
	}
}

fn invisible_links(summaries: &[RecipeSummary], options: &BuildOptions) -> Vec<GraphLink> {
	let mut seen: HashSet<(String, String)> = HashSet::new();
	let mut links = Vec::new();

	if options.link_same_building {
		let mut buildings: Vec<(&str, Vec<&RecipeSummary>)> = Vec::new();
		for summary in summaries.iter().filter(|s| !s.building.is_empty()) {
			match buildings.iter_mut().find(|(b, _)| *b == summary.building) {
				Some((_, members)) => members.push(summary),
				None => buildings.push((summary.building.as_str(), vec![summary])),
			}
		}
		for (_, members) in &buildings {
			for (i, a) in members.iter().enumerate() {
				for b in &members[i + 1..] {
					push_pair(&mut seen, &mut links, &a.node_id, &b.node_id);
				}
			}
		}
	}

	if let Some(threshold) = options.shared_item_threshold {
		for (i, a) in summaries.iter().enumerate() {
			for b in &summaries[i + 1..] {
				if a.items.intersection(&b.items).count() >= threshold.max(1) {
					push_pair(&mut seen, &mut links, &a.node_id, &b.node_id);
				}
			}
		}
	}

	links
}

/// Emits `a -> b` unless the pair is already linked in either direction.
fn push_pair(seen: &mut HashSet<(String, String)>, links: &mut Vec<GraphLink>, a: &str, b: &str) {
	let key = if a <= b {
		(a.to_string(), b.to_string())
	} else {
		(b.to_string(), a.to_string())
	};
	if a != b && seen.insert(key) {
		links.push(GraphLink::invisible(a, b));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::recipe_graph::types::{LinkKind, NodeKind};

	fn smelter() -> RecipeRow {
		RecipeRow::new("R1")
			.building("Smelter")
			.time("10")
			.input("Ore", 2)
			.output("Ingot", 1)
	}

	#[test]
	fn single_row_builds_three_nodes_two_links() {
		let data = build_graph(&[smelter()], &BuildOptions::plain());

		let ids: Vec<_> = data.nodes.iter().map(|n| n.id()).collect();
		assert_eq!(ids, ["Ore", "Ingot", "recipe_R1"]);
		assert_eq!(data.nodes[0].kind(), NodeKind::Material);
		assert_eq!(data.nodes[2].kind(), NodeKind::Recipe);

		assert_eq!(
			data.links,
			vec![
				GraphLink::input("Ore", "recipe_R1", 2),
				GraphLink::output("recipe_R1", "Ingot", 1),
			]
		);
	}

	#[test]
	fn empty_recipe_id_contributes_nothing() {
		let data = build_graph(&[RecipeRow::new("").input("Ore", 1)], &BuildOptions::default());
		assert!(data.is_empty());
	}

	#[test]
	fn materials_are_deduplicated_first_wins() {
		let mut first = smelter();
		first.inputs[0].icon = Some("first.png".into());
		let mut second = RecipeRow::new("R2").input("Ore", 3).output("Slag", 1);
		second.inputs[0].icon = Some("second.png".into());

		let data = build_graph(&[first, second], &BuildOptions::plain());
		let ores: Vec<_> = data.nodes.iter().filter(|n| n.id() == "Ore").collect();
		assert_eq!(ores.len(), 1);
		match ores[0] {
			GraphNode::Material(m) => assert_eq!(m.icon.as_deref(), Some("first.png")),
			other => panic!("unexpected node {other:?}"),
		}
	}

	#[test]
	fn recipe_without_outputs_still_has_a_node() {
		let data = build_graph(&[RecipeRow::new("Burn").input("Wood", 1)], &BuildOptions::plain());
		assert!(data.node("recipe_Burn").is_some());
		assert_eq!(data.links.len(), 1);
		assert_eq!(data.links[0].kind, LinkKind::Input);
	}

	#[test]
	fn duplicate_recipe_id_overwrites_in_place() {
		let rows = [
			smelter(),
			RecipeRow::new("R1").building("Furnace").input("Ore", 1),
		];
		let data = build_graph(&rows, &BuildOptions::default());
		let recipes: Vec<_> = data
			.nodes
			.iter()
			.filter_map(|n| match n {
				GraphNode::Recipe(r) => Some(r),
				_ => None,
			})
			.collect();
		assert_eq!(recipes.len(), 1);
		assert_eq!(recipes[0].building, "Furnace");
		assert!(data.links.iter().all(|l| l.source != l.target));
	}

	#[test]
	fn same_building_recipes_get_invisible_links() {
		let rows = [
			smelter(),
			RecipeRow::new("R2").building("Smelter").input("Sand", 1).output("Glass", 1),
			RecipeRow::new("R3").building("Smelter").input("Ore", 1).output("Slag", 1),
			RecipeRow::new("R4").building("Press").input("Ingot", 1).output("Plate", 1),
		];
		let data = build_graph(&rows, &BuildOptions::default());
		let invisible: Vec<_> = data
			.links
			.iter()
			.filter(|l| l.kind == LinkKind::Invisible)
			.map(|l| (l.source.as_str(), l.target.as_str()))
			.collect();
		assert_eq!(
			invisible,
			[
				("recipe_R1", "recipe_R2"),
				("recipe_R1", "recipe_R3"),
				("recipe_R2", "recipe_R3"),
			]
		);
		assert!(data.links.iter().filter(|l| !l.is_visible()).all(|l| l.qty.is_none()));
	}

	#[test]
	fn shared_item_links_respect_threshold() {
		let rows = [
			RecipeRow::new("A").input("x", 1).input("y", 1).output("z", 1),
			RecipeRow::new("B").input("x", 1).input("y", 1).output("z", 2),
			RecipeRow::new("C").input("x", 1).output("w", 1),
		];
		let options = BuildOptions {
			link_same_building: false,
			shared_item_threshold: Some(3),
		};
		let data = build_graph(&rows, &options);
		let invisible: Vec<_> = data.links.iter().filter(|l| !l.is_visible()).collect();
		assert_eq!(invisible.len(), 1);
		assert_eq!(invisible[0].source, "recipe_A");
		assert_eq!(invisible[0].target, "recipe_B");
	}
}
