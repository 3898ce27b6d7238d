//! Detail-panel lookups for a single node.

use serde::Serialize;

use super::types::{GraphData, GraphNode, LinkKind};

/// An item quantity attached to a recipe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemQty {
	/// Material node id.
	pub id: String,
	/// Slot quantity from the link.
	pub qty: Option<i64>,
}

/// What a detail panel shows for one node.
///
/// Every variant carries the node `id` and its display `label`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeDetails {
	/// A recipe with its items in link order.
	Recipe {
		/// Node id.
		id: String,
		/// Display label.
		label: String,
		/// Building the recipe is crafted in.
		building: String,
		/// Craft time as exported.
		time: String,
		/// Consumed materials.
		inputs: Vec<ItemQty>,
		/// Produced materials.
		outputs: Vec<ItemQty>,
	},
	/// A material with the recipes around it.
	Material {
		/// Node id.
		id: String,
		/// Display label.
		label: String,
		/// Recipes with an output link to this material.
		#[serde(rename = "producedBy")]
		produced_by: Vec<String>,
		/// Recipes with an input link from this material.
		#[serde(rename = "usedIn")]
		used_in: Vec<String>,
	},
	/// A cluster and the nodes it absorbed.
	Cluster {
		/// Node id.
		id: String,
		/// Display label.
		label: String,
		/// Members in their original order.
		members: Vec<GraphNode>,
	},
}

fn items(data: &GraphData, kind: LinkKind, pick: impl Fn(&str, &str) -> Option<String>) -> Vec<ItemQty> {
	data.links
		.iter()
		.filter(|l| l.kind == kind)
		.filter_map(|l| {
			pick(&l.source, &l.target).map(|id| ItemQty { id, qty: l.qty })
		})
		.collect()
}

/// Builds the detail view of a node present in `data`.
pub fn details(data: &GraphData, id: &str) -> Option<NodeDetails> {
	let node = data.node(id)?;
	let other_end = |from: &str, to: &str, this: &str| -> Option<String> {
		if to == this {
			Some(from.to_string())
		} else {
			None
		}
	};

	let label = node.name();
	Some(match node {
		GraphNode::Recipe(r) => NodeDetails::Recipe {
			id: r.id.clone(),
			label,
			building: r.building.clone(),
			time: r.time.clone(),
			inputs: items(data, LinkKind::Input, |s, t| other_end(s, t, id)),
			outputs: items(data, LinkKind::Output, |s, t| other_end(t, s, id)),
		},
		GraphNode::Material(m) => NodeDetails::Material {
			id: m.id.clone(),
			label,
			produced_by: items(data, LinkKind::Output, |s, t| other_end(s, t, id))
				.into_iter()
				.map(|i| i.id)
				.collect(),
			used_in: items(data, LinkKind::Input, |s, t| other_end(t, s, id))
				.into_iter()
				.map(|i| i.id)
				.collect(),
		},
		GraphNode::Cluster(c) => NodeDetails::Cluster {
			id: c.id.clone(),
			label,
			members: c.clustered_nodes.clone(),
		},
	})
}

/// Finds a node by its original id, looking inside clusters when needed.
/// Returns the top-level node that represents `id` in the graph.
pub fn locate<'a>(data: &'a GraphData, id: &str) -> Option<&'a GraphNode> {
	data.node(id).or_else(|| {
		data.nodes.iter().find(|n| {
			n.as_cluster()
				.is_some_and(|c| c.clustered_nodes.iter().any(|m| m.id() == id))
		})
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::recipe_graph::builder::{BuildOptions, build_graph};
	use crate::components::recipe_graph::cluster::{ClusterOptions, cluster_nodes};
	use crate::components::recipe_graph::rows::RecipeRow;

	fn data() -> GraphData {
		build_graph(
			&[
				RecipeRow::new("R1")
					.building("Smelter")
					.time("5")
					.input("Ore", 2)
					.input("Coal", 1)
					.output("Ingot", 1),
				RecipeRow::new("R2").input("Ingot", 4).output("Plate", 1),
			],
			&BuildOptions::plain(),
		)
	}

	#[test]
	fn recipe_details_list_items_with_quantities() {
		let d = details(&data(), "recipe_R1").unwrap();
		match d {
			NodeDetails::Recipe { label, building, inputs, outputs, .. } => {
				assert_eq!(label, "R1");
				assert_eq!(building, "Smelter");
				assert_eq!(
					inputs,
					vec![
						ItemQty { id: "Ore".into(), qty: Some(2) },
						ItemQty { id: "Coal".into(), qty: Some(1) },
					]
				);
				assert_eq!(outputs, vec![ItemQty { id: "Ingot".into(), qty: Some(1) }]);
			}
			other => panic!("unexpected details {other:?}"),
		}
	}

	#[test]
	fn material_details_list_producers_and_consumers() {
		match details(&data(), "Ingot").unwrap() {
			NodeDetails::Material { produced_by, used_in, .. } => {
				assert_eq!(produced_by, ["recipe_R1"]);
				assert_eq!(used_in, ["recipe_R2"]);
			}
			other => panic!("unexpected details {other:?}"),
		}
		assert!(details(&data(), "Nothing").is_none());
	}

	#[test]
	fn locate_finds_clustered_members() {
		let clustered = cluster_nodes(
			build_graph(
				&[
					RecipeRow::new("A").input("x", 1).output("y", 1),
					RecipeRow::new("B").input("x", 1).output("y", 1),
				],
				&BuildOptions::plain(),
			),
			&ClusterOptions::default(),
		);
		let found = locate(&clustered, "recipe_B").unwrap();
		assert_eq!(found.id(), "cluster_recipe_A+recipe_B");
		match details(&clustered, found.id()).unwrap() {
			NodeDetails::Cluster { label, members, .. } => {
				assert_eq!(label, "2 nodes");
				assert_eq!(members.len(), 2);
			}
			other => panic!("unexpected details {other:?}"),
		}
		assert_eq!(locate(&clustered, "x").unwrap().id(), "x");
		assert!(locate(&clustered, "z").is_none());
	}
}
