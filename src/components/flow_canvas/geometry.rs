use crate::config::{NODE_HEIGHT, NODE_WIDTH};
use crate::model::{Model, Node};

pub fn center(node: &Node) -> (f64, f64) {
	(node.x + NODE_WIDTH / 2.0, node.y + NODE_HEIGHT / 2.0)
}

pub fn contains(node: &Node, x: f64, y: f64) -> bool {
	x >= node.x && x <= node.x + NODE_WIDTH && y >= node.y && y <= node.y + NODE_HEIGHT
}

/// Topmost card under `(x, y)`. Later nodes are drawn over earlier ones.
pub fn node_at(nodes: &[Node], x: f64, y: f64) -> Option<&Node> {
	nodes.iter().rev().find(|n| contains(n, x, y))
}

/// Where the segment from `from` to the centre of `node` crosses its border.
pub fn border_point(from: (f64, f64), node: &Node) -> (f64, f64) {
	let (cx, cy) = center(node);
	let (dx, dy) = (cx - from.0, cy - from.1);
	let (hw, hh) = (NODE_WIDTH / 2.0, NODE_HEIGHT / 2.0);
	let tx = if dx.abs() > f64::EPSILON { hw / dx.abs() } else { f64::INFINITY };
	let ty = if dy.abs() > f64::EPSILON { hh / dy.abs() } else { f64::INFINITY };
	let t = tx.min(ty);
	if !t.is_finite() || t >= 1.0 {
		return (cx, cy);
	}
	if tx <= ty {
		(cx - hw.copysign(dx), cy - dy * tx)
	} else {
		(cx - dx * ty, cy - hh.copysign(dy))
	}
}

/// One edge ready to draw: centre-to-centre segment plus arrow tip.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLine {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub tip: (f64, f64),
}

/// Lines for every edge whose endpoints both exist; dangling edges are skipped.
pub fn edge_lines(model: &Model) -> Vec<EdgeLine> {
	model
		.edges()
		.iter()
		.filter_map(|e| {
			let source = model.node(&e.source_id)?;
			let target = model.node(&e.target_id)?;
			let from = center(source);
			Some(EdgeLine {
				from,
				to: center(target),
				tip: border_point(from, target),
			})
		})
		.collect()
}
