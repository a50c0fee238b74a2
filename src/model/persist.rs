//! JSON encoding of the model for local storage, export and import.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::store::Model;
use super::types::{Edge, Node};
use crate::error::{Error, Result};

#[derive(Serialize)]
struct Snapshot<'a> {
	nodes: &'a [Node],
	edges: &'a [Edge],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
	nodes: &'a [Node],
	edges: &'a [Edge],
	exported_at: String,
}

#[derive(Deserialize)]
struct ModelDocument {
	nodes: Vec<serde_json::Value>,
	edges: Vec<serde_json::Value>,
}

/// Decodes each entry on its own, dropping the ones that do not fit.
fn decode_entries<T: DeserializeOwned>(entries: Vec<serde_json::Value>, what: &str) -> Vec<T> {
	let total = entries.len();
	let kept: Vec<T> = entries
		.into_iter()
		.filter_map(|entry| serde_json::from_value(entry).ok())
		.collect();
	if kept.len() < total {
		log::warn!("skipped {} unreadable {what}", total - kept.len());
	}
	kept
}

/// Compact `{nodes, edges}` blob written to local storage.
pub fn encode(model: &Model) -> Result<String> {
	Ok(serde_json::to_string(&Snapshot {
		nodes: model.nodes(),
		edges: model.edges(),
	})?)
}

/// Rebuilds a model from a stored blob. Anything unreadable yields an
/// empty model.
pub fn restore(saved: Option<&str>) -> Model {
	let Some(text) = saved else {
		return Model::default();
	};
	match decode(text) {
		Ok((nodes, edges)) => {
			log::info!("restored {} nodes, {} edges", nodes.len(), edges.len());
			Model::from_parts(nodes, edges)
		}
		Err(err) => {
			log::warn!("discarding saved model: {err}");
			Model::default()
		}
	}
}

/// Pretty-printed export document stamped with `at`.
pub fn export(model: &Model, at: DateTime<Utc>) -> Result<String> {
	Ok(serde_json::to_string_pretty(&ExportDocument {
		nodes: model.nodes(),
		edges: model.edges(),
		exported_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
	})?)
}

/// Parses a `{nodes: [...], edges: [...]}` document. Extra fields are
/// ignored, as are individual nodes or edges that cannot be read; edge
/// endpoints are not checked against the nodes.
pub fn decode(text: &str) -> Result<(Vec<Node>, Vec<Edge>)> {
	let value: serde_json::Value = serde_json::from_str(text)?;
	let is_array = |field: &str| value.get(field).is_some_and(serde_json::Value::is_array);
	if !is_array("nodes") || !is_array("edges") {
		return Err(Error::InvalidModel(
			"expected `nodes` and `edges` arrays".into(),
		));
	}
	let doc: ModelDocument =
		serde_json::from_value(value).map_err(|e| Error::InvalidModel(e.to_string()))?;
	Ok((
		decode_entries(doc.nodes, "nodes"),
		decode_entries(doc.edges, "edges"),
	))
}
