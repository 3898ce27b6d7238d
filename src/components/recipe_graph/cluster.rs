//! Collapses structurally identical nodes into cluster nodes.
//!
//! Two nodes are identical when their sorted lists of visible incoming and
//! outgoing `(other endpoint, link kind)` pairs match exactly. Each group of
//! two or more such nodes becomes one [`ClusterNode`], every link is
//! re-pointed at the cluster, links that collapse onto themselves are dropped
//! and the remainder is deduplicated on `(source, target, kind)`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, info};
use serde::Deserialize;

use super::types::{CLUSTER_ID_PREFIX, ClusterNode, GraphData, GraphLink, GraphNode, LinkKind};

/// Clustering behaviour.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterOptions {
	/// Also group nodes without any visible link. They all share the empty
	/// signature, so enabling this puts every orphan into one cluster.
	pub cluster_orphans: bool,
}

/// Canonical description of a node's visible connections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
	/// Sorted `(source, kind)` pairs of visible incoming links.
	pub incoming: Vec<(String, LinkKind)>,
	/// Sorted `(target, kind)` pairs of visible outgoing links.
	pub outgoing: Vec<(String, LinkKind)>,
}

impl Signature {
	/// True for nodes without any visible link.
	pub fn is_empty(&self) -> bool {
		self.incoming.is_empty() && self.outgoing.is_empty()
	}

	fn sort(&mut self) {
		self.incoming.sort();
		self.outgoing.sort();
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fn list(f: &mut fmt::Formatter<'_>, edges: &[(String, LinkKind)]) -> fmt::Result {
			for (i, (id, kind)) in edges.iter().enumerate() {
				if i > 0 {
					f.write_str(",")?;
				}
				write!(f, "{id}:{}", kind.as_str())?;
			}
			Ok(())
		}
		f.write_str("inputs:[")?;
		list(f, &self.incoming)?;
		f.write_str("]|outputs:[")?;
		list(f, &self.outgoing)?;
		f.write_str("]")
	}
}

/// Computes the signature of every node, in node order.
pub fn signatures(data: &GraphData) -> Vec<Signature> {
	let index: HashMap<&str, usize> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id(), i))
		.collect();
	let mut sigs = vec![Signature::default(); data.nodes.len()];

	for link in data.visible_links() {
		if let Some(&t) = index.get(link.target.as_str()) {
			sigs[t].incoming.push((link.source.clone(), link.kind));
		}
		if let Some(&s) = index.get(link.source.as_str()) {
			sigs[s].outgoing.push((link.target.clone(), link.kind));
		}
	}

	for sig in &mut sigs {
		sig.sort();
	}
	sigs
}

/// Deterministic id for a group of member ids.
///
/// Member ids may themselves contain `+`, so two different groups can render
/// to the same string. [`cluster_nodes`] resolves such collisions.
pub fn cluster_id<'a>(member_ids: impl IntoIterator<Item = &'a str>) -> String {
	let mut ids: Vec<&str> = member_ids.into_iter().collect();
	ids.sort_unstable();
	format!("{CLUSTER_ID_PREFIX}{}", ids.join("+"))
}

/// Groups node indices by signature, groups ordered by their first member.
fn group_indices(sigs: &[Signature], options: &ClusterOptions) -> Vec<Vec<usize>> {
	let mut groups: Vec<Vec<usize>> = Vec::new();
	let mut by_signature: HashMap<&Signature, usize> = HashMap::new();

	for (i, sig) in sigs.iter().enumerate() {
		if sig.is_empty() && !options.cluster_orphans {
			groups.push(vec![i]);
			continue;
		}
		match by_signature.get(sig) {
			Some(&g) => groups[g].push(i),
			None => {
				by_signature.insert(sig, groups.len());
				groups.push(vec![i]);
			}
		}
	}
	groups
}

/// Replaces every group of identical nodes with a single cluster node.
pub fn cluster_nodes(data: GraphData, options: &ClusterOptions) -> GraphData {
	let sigs = signatures(&data);
	let groups = group_indices(&sigs, options);

	let mut slots: Vec<Option<GraphNode>> = data.nodes.into_iter().map(Some).collect();
	let mut nodes = Vec::with_capacity(groups.len());
	let mut remap: HashMap<String, String> = HashMap::new();
	let mut taken: HashSet<String> = slots.iter().flatten().map(|n| n.id().to_string()).collect();

	for group in &groups {
		let members: Vec<GraphNode> = group.iter().filter_map(|&i| slots[i].take()).collect();
		if members.len() < 2 {
			nodes.extend(members);
			continue;
		}

		let id = claim_id(cluster_id(members.iter().map(|m| m.id())), &mut taken);
		debug!(
			"recipe-graph: clustering {} nodes as {} ({})",
			members.len(),
			id,
			sigs[group[0]]
		);
		for member in &members {
			remap.insert(member.id().to_string(), id.clone());
		}
		let original_type = members[0].kind();
		nodes.push(GraphNode::Cluster(ClusterNode {
			id,
			clustered_nodes: members,
			original_type,
		}));
	}

	let links = repoint_links(data.links, &remap);
	info!(
		"recipe-graph: clustered into {} nodes ({} clusters), {} links",
		nodes.len(),
		nodes.iter().filter(|n| n.as_cluster().is_some()).count(),
		links.len()
	);

	GraphData { nodes, links }
}

/// Reserves `base`, or `base#2`, `base#3`, ... when it is already in use.
fn claim_id(base: String, taken: &mut HashSet<String>) -> String {
	if taken.insert(base.clone()) {
		return base;
	}
	let mut n = 2;
	loop {
		let id = format!("{base}#{n}");
		if taken.insert(id.clone()) {
			return id;
		}
		n += 1;
	}
}

/// Moves link endpoints onto their clusters, dropping self-loops and
/// duplicate `(source, target, kind)` triples. First occurrence wins.
fn repoint_links(links: Vec<GraphLink>, remap: &HashMap<String, String>) -> Vec<GraphLink> {
	let mut seen = HashSet::new();
	links
		.into_iter()
		.filter_map(|mut link| {
			if let Some(id) = remap.get(&link.source) {
				link.source = id.clone();
			}
			if let Some(id) = remap.get(&link.target) {
				link.target = id.clone();
			}
			link.computed_opacity = None;
			(link.source != link.target && seen.insert(link.key())).then_some(link)
		})
		.collect()
}
