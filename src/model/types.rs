use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque node identifier. Never changes once a node exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// Fresh random (UUIDv4) id.
	pub fn random() -> Self {
		Self(uuid::Uuid::new_v4().to_string())
	}

	/// The raw id text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Role of a node in the flowchart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// A transformation step.
	Process,
	/// Material or energy entering the system.
	Input,
	/// Product, emission or waste leaving the system.
	Output,
}

impl NodeKind {
	/// Every kind, in toolbar order.
	pub const ALL: [NodeKind; 3] = [NodeKind::Process, NodeKind::Input, NodeKind::Output];

	/// Capitalized name used for default node names and the inspector.
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Process => "Process",
			NodeKind::Input => "Input",
			NodeKind::Output => "Output",
		}
	}

	/// Lowercase wire name, as stored in `type`.
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Process => "process",
			NodeKind::Input => "input",
			NodeKind::Output => "output",
		}
	}

	/// (card fill, card border, dot) colors.
	pub fn palette(self) -> (&'static str, &'static str, &'static str) {
		match self {
			NodeKind::Process => ("#ecfdf5", "#a7f3d0", "#10b981"),
			NodeKind::Input => ("#f0f9ff", "#bae6fd", "#0ea5e9"),
			NodeKind::Output => ("#fffbeb", "#fde68a", "#f59e0b"),
		}
	}
}

/// One card on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Immutable identity.
	pub id: NodeId,
	/// Serialized as `type`.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Display name; free text.
	#[serde(default)]
	pub name: String,
	/// Top-left corner, canvas pixels, never negative.
	#[serde(default, deserialize_with = "lenient_number")]
	pub x: f64,
	/// Top-left corner, canvas pixels, never negative.
	#[serde(default, deserialize_with = "lenient_number")]
	pub y: f64,
	/// Environmental impact in kg CO₂e.
	#[serde(default, deserialize_with = "lenient_number")]
	pub impact: f64,
}

/// Directed "flows into" relation, referencing nodes by id only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Node the flow leaves.
	pub source_id: NodeId,
	/// Node the flow enters.
	pub target_id: NodeId,
}

impl Edge {
	/// Edge `source_id -> target_id`.
	pub fn new(source_id: impl Into<NodeId>, target_id: impl Into<NodeId>) -> Self {
		Self {
			source_id: source_id.into(),
			target_id: target_id.into(),
		}
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &NodeId) -> bool {
		&self.source_id == id || &self.target_id == id
	}
}

/// Fields the inspector may overwrite. `None` leaves the field alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	/// New name.
	pub name: Option<String>,
	/// New impact.
	pub impact: Option<f64>,
}

impl NodePatch {
	/// Patch renaming the node.
	pub fn name(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	/// Patch setting the impact.
	pub fn impact(impact: f64) -> Self {
		Self {
			impact: Some(impact),
			..Self::default()
		}
	}

	pub(crate) fn apply(self, node: &mut Node) {
		if let Some(name) = self.name {
			node.name = name;
		}
		if let Some(impact) = self.impact {
			node.impact = impact;
		}
	}
}

/// Turns impact field text into a number. Anything that is not a finite
/// number becomes 0.
pub fn coerce_impact(text: &str) -> f64 {
	let text = text.trim();
	if text.is_empty() {
		return 0.0;
	}
	text.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite())
		.unwrap_or(0.0)
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	Ok(match value {
		serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
		serde_json::Value::String(s) => coerce_impact(&s),
		serde_json::Value::Bool(b) => f64::from(u8::from(b)),
		_ => 0.0,
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn node_uses_wire_field_names() {
		let node = Node {
			id: "a1".into(),
			kind: NodeKind::Output,
			name: "Output 1".into(),
			x: 60.0,
			y: 80.0,
			impact: 1.5,
		};
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"id": "a1",
				"type": "output",
				"name": "Output 1",
				"x": 60.0,
				"y": 80.0,
				"impact": 1.5,
			})
		);

		let edge = serde_json::to_value(Edge::new("a", "b")).unwrap();
		assert_eq!(edge, serde_json::json!({ "sourceId": "a", "targetId": "b" }));
	}

	#[test]
	fn lenient_scalars_default_to_zero() {
		let node: Node = serde_json::from_str(
			r#"{"id":"n","type":"input","impact":"abc","x":"12.5","extra":true}"#,
		)
		.unwrap();
		assert_eq!(node.name, "");
		assert_eq!(node.x, 12.5);
		assert_eq!(node.y, 0.0);
		assert_eq!(node.impact, 0.0);

		let node: Node =
			serde_json::from_str(r#"{"id":"n","type":"process","impact":null}"#).unwrap();
		assert_eq!(node.impact, 0.0);
	}

	#[test]
	fn unknown_kind_is_rejected() {
		let res = serde_json::from_str::<Node>(r#"{"id":"n","type":"storage"}"#);
		assert!(res.is_err());
	}

	#[test]
	fn impact_text_coercion() {
		assert_eq!(coerce_impact("3.25"), 3.25);
		assert_eq!(coerce_impact(" -2 "), -2.0);
		assert_eq!(coerce_impact(""), 0.0);
		assert_eq!(coerce_impact("12kg"), 0.0);
		assert_eq!(coerce_impact("NaN"), 0.0);
		assert_eq!(coerce_impact("inf"), 0.0);
	}

	#[test]
	fn random_ids_differ() {
		assert_ne!(NodeId::random(), NodeId::random());
	}
}
