use log::debug;

use super::types::{Edge, Node, NodeId, NodeKind, NodePatch};
use crate::config::{STAGGER_ORIGIN, STAGGER_STEP};

/// Nodes, edges and the current selection of one flowchart.
///
/// Mutating operations return `true` when the persisted part of the model
/// (nodes and edges) changed, so callers know when to write it back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	selected: Option<NodeId>,
}

impl Model {
	/// Builds a model from already decoded collections. Edges are taken as is,
	/// even if they reference ids that are not in `nodes`.
	pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self {
			nodes,
			edges,
			selected: None,
		}
	}

	/// Nodes in insertion (and drawing) order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in creation order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Looks a node up by id.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| &n.id == id)
	}

	/// Id of the selected node.
	pub fn selected_id(&self) -> Option<&NodeId> {
		self.selected.as_ref()
	}

	/// The selected node, if it still exists.
	pub fn selected(&self) -> Option<&Node> {
		self.selected.as_ref().and_then(|id| self.node(id))
	}

	/// No nodes and no edges.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	/// Selects `id`, or clears the selection with `None`. Unknown ids clear it too.
	pub fn select(&mut self, id: Option<NodeId>) {
		self.selected = id.filter(|id| self.node(id).is_some());
	}

	/// Appends a node of `kind` with a per-kind numbered name and a staggered
	/// position, selects it and returns its id.
	pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
		let count = self.nodes.len() as f64;
		let same_kind = self.nodes.iter().filter(|n| n.kind == kind).count();
		let mut id = NodeId::random();
		while self.node(&id).is_some() {
			id = NodeId::random();
		}

		self.nodes.push(Node {
			id: id.clone(),
			kind,
			name: format!("{} {}", kind.label(), same_kind + 1),
			x: STAGGER_ORIGIN.0 + count * STAGGER_STEP.0,
			y: STAGGER_ORIGIN.1 + count * STAGGER_STEP.1,
			impact: 0.0,
		});
		self.selected = Some(id.clone());
		id
	}

	/// Moves a node, clamping both coordinates at 0.
	pub fn move_node(&mut self, id: &NodeId, x: f64, y: f64) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) else {
			return false;
		};
		let (x, y) = (x.max(0.0), y.max(0.0));
		if node.x == x && node.y == y {
			return false;
		}
		node.x = x;
		node.y = y;
		true
	}

	/// Merges `patch` into the node. Unknown ids are ignored.
	pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> bool {
		let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) else {
			return false;
		};
		let before = node.clone();
		patch.apply(node);
		*node != before
	}

	/// Deletes a node together with every edge that starts or ends at it,
	/// and clears the selection.
	pub fn remove_node(&mut self, id: &NodeId) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| &n.id != id);
		if self.nodes.len() == before {
			return false;
		}
		self.selected = None;
		self.edges.retain(|e| !e.touches(id));
		true
	}

	/// Appends `source -> target` unless the source is unset, it would be a
	/// self-loop, an endpoint no longer exists, or the same ordered pair
	/// already exists.
	pub fn add_edge(&mut self, source: Option<&NodeId>, target: &NodeId) -> bool {
		let Some(source) = source else {
			debug!("edge rejected: no source armed");
			return false;
		};
		if source == target {
			debug!("edge rejected: self-loop on {source}");
			return false;
		}
		if self.node(source).is_none() || self.node(target).is_none() {
			debug!("edge rejected: {source} -> {target} references a missing node");
			return false;
		}
		if self
			.edges
			.iter()
			.any(|e| &e.source_id == source && &e.target_id == target)
		{
			debug!("edge rejected: {source} -> {target} already exists");
			return false;
		}
		self.edges.push(Edge::new(source.clone(), target.clone()));
		true
	}

	/// Empties the model. Callers are expected to have asked the user first.
	pub fn clear(&mut self) -> bool {
		self.selected = None;
		let changed = !self.is_empty();
		self.nodes.clear();
		self.edges.clear();
		changed
	}

	/// Replaces both collections wholesale and clears the selection.
	pub fn replace(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
		*self = Self::from_parts(nodes, edges);
	}

	/// Sum of all node impacts; non-finite values count as 0.
	pub fn total_impact(&self) -> f64 {
		self.nodes
			.iter()
			.map(|n| n.impact)
			.filter(|v| v.is_finite())
			.sum()
	}

	/// Edges whose source or target is not a current node. Only reachable
	/// through import.
	pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges
			.iter()
			.filter(|e| self.node(&e.source_id).is_none() || self.node(&e.target_id).is_none())
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	fn names(model: &Model) -> Vec<&str> {
		model.nodes().iter().map(|n| n.name.as_str()).collect()
	}

	#[test]
	fn add_node_names_count_per_kind() {
		let mut model = Model::default();
		model.add_node(NodeKind::Process);
		model.add_node(NodeKind::Input);
		model.add_node(NodeKind::Input);
		model.add_node(NodeKind::Process);
		model.add_node(NodeKind::Output);
		assert_eq!(
			names(&model),
			["Process 1", "Input 1", "Input 2", "Process 2", "Output 1"]
		);
	}

	#[test]
	fn add_node_staggers_and_selects() {
		let mut model = Model::default();
		let first = model.add_node(NodeKind::Process);
		let second = model.add_node(NodeKind::Output);

		let a = model.node(&first).unwrap();
		assert_eq!((a.x, a.y, a.impact), (60.0, 80.0, 0.0));
		let b = model.node(&second).unwrap();
		assert_eq!((b.x, b.y), (84.0, 98.0));
		assert_eq!(model.selected_id(), Some(&second));
	}

	#[test]
	fn move_node_clamps_and_ignores_unknown() {
		let mut model = Model::default();
		let id = model.add_node(NodeKind::Input);

		assert!(model.move_node(&id, -15.0, 40.0));
		let node = model.node(&id).unwrap();
		assert_eq!((node.x, node.y), (0.0, 40.0));

		let before = model.clone();
		assert!(!model.move_node(&"missing".into(), 10.0, 10.0));
		assert_eq!(model, before);
	}

	#[test]
	fn update_node_merges_patch() {
		let mut model = Model::default();
		let id = model.add_node(NodeKind::Process);

		assert!(model.update_node(&id, NodePatch::impact(4.5)));
		assert!(model.update_node(&id, NodePatch::name("Smelting")));
		let node = model.node(&id).unwrap();
		assert_eq!((node.name.as_str(), node.impact), ("Smelting", 4.5));

		assert!(!model.update_node(&id, NodePatch::impact(4.5)));
		assert!(!model.update_node(&"gone".into(), NodePatch::name("x")));
	}

	#[test]
	fn remove_node_cascades_edges() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		let b = model.add_node(NodeKind::Process);
		let c = model.add_node(NodeKind::Output);
		model.add_edge(Some(&a), &b);
		model.add_edge(Some(&b), &c);
		model.add_edge(Some(&a), &c);

		assert!(model.remove_node(&b));
		assert_eq!(model.edges(), [Edge::new(a.clone(), c.clone())]);
		assert_eq!(model.selected_id(), None);
		assert_eq!(model.dangling_edges().count(), 0);
	}

	#[test]
	fn remove_unknown_node_keeps_model() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		let b = model.add_node(NodeKind::Output);
		model.add_edge(Some(&a), &b);
		let before = model.clone();

		assert!(!model.remove_node(&"nope".into()));
		assert_eq!(model, before);
	}

	#[test]
	fn add_edge_rejections() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		let b = model.add_node(NodeKind::Output);

		assert!(!model.add_edge(None, &b));
		assert!(!model.add_edge(Some(&a), &a));
		assert!(model.add_edge(Some(&a), &b));
		assert!(!model.add_edge(Some(&a), &b));
		assert!(model.add_edge(Some(&b), &a));
		assert_eq!(model.edges().len(), 2);
	}

	#[test]
	fn add_edge_to_deleted_node_is_ignored() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		let b = model.add_node(NodeKind::Output);
		model.remove_node(&b);

		assert!(!model.add_edge(Some(&a), &b));
		assert!(!model.add_edge(Some(&b), &a));
		assert!(model.edges().is_empty());
	}

	#[test]
	fn total_after_remove() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		let b = model.add_node(NodeKind::Process);
		let c = model.add_node(NodeKind::Output);
		model.update_node(&a, NodePatch::impact(2.5));
		model.update_node(&b, NodePatch::impact(3.25));
		model.update_node(&c, NodePatch::impact(10.0));
		assert_eq!(model.total_impact(), 15.75);

		model.remove_node(&c);
		assert_eq!(model.total_impact(), 5.75);
	}

	#[test]
	fn clear_resets_everything() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		let b = model.add_node(NodeKind::Output);
		model.add_edge(Some(&a), &b);

		assert!(model.clear());
		assert!(model.is_empty());
		assert_eq!(model.selected_id(), None);
		assert!(!model.clear());
	}

	#[test]
	fn select_ignores_unknown_ids() {
		let mut model = Model::default();
		let a = model.add_node(NodeKind::Input);
		model.select(Some("ghost".into()));
		assert_eq!(model.selected_id(), None);
		model.select(Some(a.clone()));
		assert_eq!(model.selected().map(|n| &n.id), Some(&a));
	}

	fn kind() -> impl Strategy<Value = NodeKind> {
		prop_oneof![
			Just(NodeKind::Process),
			Just(NodeKind::Input),
			Just(NodeKind::Output),
		]
	}

	proptest! {
		#[test]
		fn ids_unique_and_names_per_kind(kinds in prop::collection::vec(kind(), 0..40)) {
			let mut model = Model::default();
			for k in &kinds {
				model.add_node(*k);
			}
			let ids: HashSet<_> = model.nodes().iter().map(|n| n.id.clone()).collect();
			prop_assert_eq!(ids.len(), kinds.len());

			for k in NodeKind::ALL {
				let expected: Vec<String> = (1..=kinds.iter().filter(|x| **x == k).count())
					.map(|i| format!("{} {}", k.label(), i))
					.collect();
				let actual: Vec<String> = model
					.nodes()
					.iter()
					.filter(|n| n.kind == k)
					.map(|n| n.name.clone())
					.collect();
				prop_assert_eq!(actual, expected);
			}
		}

		#[test]
		fn edges_never_loop_or_repeat(pairs in prop::collection::vec((0usize..5, 0usize..5), 0..30)) {
			let mut model = Model::default();
			let ids: Vec<NodeId> = (0..5).map(|_| model.add_node(NodeKind::Process)).collect();
			for (s, t) in pairs {
				model.add_edge(Some(&ids[s]), &ids[t]);
				model.add_edge(Some(&ids[s]), &ids[t]);
			}
			let unique: HashSet<_> = model.edges().iter().collect();
			prop_assert_eq!(unique.len(), model.edges().len());
			prop_assert!(model.edges().iter().all(|e| e.source_id != e.target_id));
		}

		#[test]
		fn remove_drops_exactly_touching_edges(
			pairs in prop::collection::vec((0usize..6, 0usize..6), 0..30),
			victim in 0usize..6,
		) {
			let mut model = Model::default();
			let ids: Vec<NodeId> = (0..6).map(|_| model.add_node(NodeKind::Input)).collect();
			for (s, t) in pairs {
				model.add_edge(Some(&ids[s]), &ids[t]);
			}
			let victim = &ids[victim];
			let expected: Vec<Edge> = model
				.edges()
				.iter()
				.filter(|e| !e.touches(victim))
				.cloned()
				.collect();

			prop_assert!(model.remove_node(victim));
			prop_assert_eq!(model.edges(), expected.as_slice());
			prop_assert_eq!(model.nodes().len(), 5);
			prop_assert_eq!(model.dangling_edges().count(), 0);
		}
	}
}
