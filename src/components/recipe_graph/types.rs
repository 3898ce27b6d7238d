//! Graph data structures produced by the pipeline and handed to renderers.
//!
//! Links only ever carry node ids. Whatever resolved, positioned form a
//! layout engine needs is built on the rendering side from these values.

use serde::{Deserialize, Serialize};

/// Prefix applied to recipe ids to form recipe node ids.
pub const RECIPE_ID_PREFIX: &str = "recipe_";

/// Prefix applied to synthetic cluster node ids.
pub const CLUSTER_ID_PREFIX: &str = "cluster_";

/// Discriminant shared by every node variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// An item consumed or produced by recipes.
	Material,
	/// A craft operation.
	Recipe,
	/// A synthetic group of structurally identical nodes.
	Cluster,
}

/// An item node. Its id is the item name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialNode {
	/// Item name.
	pub id: String,
	/// Display name, the item name as well.
	pub name: String,
	/// Icon reference from the first row mentioning the item.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
}

/// A recipe node. Its id is `recipe_<RecipeId>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeNode {
	/// `recipe_<RecipeId>`.
	pub id: String,
	/// The raw recipe id.
	pub name: String,
	/// Building the recipe is crafted in.
	pub building: String,
	/// Craft time as exported.
	pub time: String,
}

/// A node standing in for every member sharing one connection signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNode {
	/// `cluster_` followed by the sorted member ids, `#n`-suffixed on a clash.
	pub id: String,
	/// Members in their original relative order.
	pub clustered_nodes: Vec<GraphNode>,
	/// Kind of the first member. Cosmetic, members keep their own kinds.
	pub original_type: NodeKind,
}

/// A node in the recipe graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphNode {
	/// An item.
	Material(MaterialNode),
	/// A craft operation.
	Recipe(RecipeNode),
	/// A group of structurally identical nodes.
	Cluster(ClusterNode),
}

impl GraphNode {
	/// Material node for an item name.
	pub fn material(name: &str, icon: Option<String>) -> Self {
		GraphNode::Material(MaterialNode {
			id: name.to_string(),
			name: name.to_string(),
			icon,
		})
	}

	/// Recipe node for a raw recipe id.
	pub fn recipe(recipe_id: &str, building: &str, time: &str) -> Self {
		GraphNode::Recipe(RecipeNode {
			id: recipe_node_id(recipe_id),
			name: recipe_id.to_string(),
			building: building.to_string(),
			time: time.to_string(),
		})
	}

	/// Unique id of this node within a graph.
	pub fn id(&self) -> &str {
		match self {
			GraphNode::Material(m) => &m.id,
			GraphNode::Recipe(r) => &r.id,
			GraphNode::Cluster(c) => &c.id,
		}
	}

	/// Human readable label.
	pub fn name(&self) -> String {
		match self {
			GraphNode::Material(m) => m.name.clone(),
			GraphNode::Recipe(r) => r.name.clone(),
			GraphNode::Cluster(c) => format!("{} nodes", c.clustered_nodes.len()),
		}
	}

	/// The variant of this node.
	pub fn kind(&self) -> NodeKind {
		match self {
			GraphNode::Material(_) => NodeKind::Material,
			GraphNode::Recipe(_) => NodeKind::Recipe,
			GraphNode::Cluster(_) => NodeKind::Cluster,
		}
	}

	/// The kind this node behaves as: clusters report their `original_type`.
	pub fn effective_kind(&self) -> NodeKind {
		match self {
			GraphNode::Cluster(c) => c.original_type,
			other => other.kind(),
		}
	}

	/// The cluster payload, if this is a cluster.
	pub fn as_cluster(&self) -> Option<&ClusterNode> {
		match self {
			GraphNode::Cluster(c) => Some(c),
			_ => None,
		}
	}
}

/// Builds the node id of a recipe from its raw recipe id.
pub fn recipe_node_id(recipe_id: &str) -> String {
	format!("{RECIPE_ID_PREFIX}{recipe_id}")
}

/// Role of a link in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
	/// Material consumed by a recipe (material -> recipe).
	Input,
	/// Material produced by a recipe (recipe -> material).
	Output,
	/// Layout hint between two recipes. Never drawn, never counted.
	Invisible,
}

impl LinkKind {
	/// Lowercase name, as serialized.
	pub fn as_str(self) -> &'static str {
		match self {
			LinkKind::Input => "input",
			LinkKind::Output => "output",
			LinkKind::Invisible => "invisible",
		}
	}

	/// Whether links of this kind are drawn.
	pub fn is_visible(self) -> bool {
		self != LinkKind::Invisible
	}
}

/// A directed edge between two node ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Role of the link, serialized as `type`.
	#[serde(rename = "type")]
	pub kind: LinkKind,
	/// Slot quantity, only present on input/output links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub qty: Option<i64>,
	/// Default stroke opacity, filled in by the opacity precomputer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub computed_opacity: Option<f64>,
}

impl GraphLink {
	/// Material consumed by a recipe.
	pub fn input(material: &str, recipe: &str, qty: i64) -> Self {
		Self::with_qty(material, recipe, LinkKind::Input, qty)
	}

	/// Material produced by a recipe.
	pub fn output(recipe: &str, material: &str, qty: i64) -> Self {
		Self::with_qty(recipe, material, LinkKind::Output, qty)
	}

	/// Layout-only link between two recipes.
	pub fn invisible(source: &str, target: &str) -> Self {
		Self {
			source: source.to_string(),
			target: target.to_string(),
			kind: LinkKind::Invisible,
			qty: None,
			computed_opacity: None,
		}
	}

	fn with_qty(source: &str, target: &str, kind: LinkKind, qty: i64) -> Self {
		Self {
			source: source.to_string(),
			target: target.to_string(),
			kind,
			qty: Some(qty),
			computed_opacity: None,
		}
	}

	/// Whether the link is drawn.
	pub fn is_visible(&self) -> bool {
		self.kind.is_visible()
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// Identity used when collapsing duplicate links.
	pub fn key(&self) -> (String, String, LinkKind) {
		(self.source.clone(), self.target.clone(), self.kind)
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes in build order.
	pub nodes: Vec<GraphNode>,
	/// Links in build order.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// No nodes and no links.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}

	/// Top-level node with the given id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id() == id)
	}

	/// Links that are meant to be drawn.
	pub fn visible_links(&self) -> impl Iterator<Item = &GraphLink> {
		self.links.iter().filter(|l| l.is_visible())
	}
}
