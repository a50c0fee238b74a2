use chrono::{DateTime, Utc};
use log::{info, warn};

use super::persist;
use super::storage::Storage;
use super::store::Model;
use super::types::{NodeId, NodeKind, NodePatch};
use crate::config::STORAGE_KEY;
use crate::error::Result;

/// A [`Model`] bound to a [`Storage`]. Every operation that changes nodes or
/// edges writes the whole model back before returning.
#[derive(Debug)]
pub struct Workspace<S> {
	model: Model,
	storage: S,
}

impl<S: Storage> Workspace<S> {
	/// Loads whatever `storage` holds, falling back to an empty model.
	pub fn restore(storage: S) -> Self {
		let saved = storage.load(STORAGE_KEY).unwrap_or_else(|err| {
			warn!("cannot read saved model: {err}");
			None
		});
		Self {
			model: persist::restore(saved.as_deref()),
			storage,
		}
	}

	/// Current model, read-only.
	pub fn model(&self) -> &Model {
		&self.model
	}

	/// Backing storage.
	pub fn storage(&self) -> &S {
		&self.storage
	}

	fn persist(&mut self) {
		let written = persist::encode(&self.model)
			.and_then(|text| self.storage.save(STORAGE_KEY, &text));
		if let Err(err) = written {
			warn!("model not saved: {err}");
		}
	}

	fn commit(&mut self, changed: bool) -> bool {
		if changed {
			self.persist();
		}
		changed
	}

	/// Changes the selection without writing to storage.
	pub fn select(&mut self, id: Option<NodeId>) {
		self.model.select(id);
	}

	/// See [`Model::add_node`].
	pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
		let id = self.model.add_node(kind);
		self.persist();
		id
	}

	/// See [`Model::move_node`].
	pub fn move_node(&mut self, id: &NodeId, x: f64, y: f64) -> bool {
		let changed = self.model.move_node(id, x, y);
		self.commit(changed)
	}

	/// See [`Model::update_node`].
	pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> bool {
		let changed = self.model.update_node(id, patch);
		self.commit(changed)
	}

	/// See [`Model::remove_node`].
	pub fn remove_node(&mut self, id: &NodeId) -> bool {
		let changed = self.model.remove_node(id);
		self.commit(changed)
	}

	/// See [`Model::add_edge`].
	pub fn add_edge(&mut self, source: Option<&NodeId>, target: &NodeId) -> bool {
		let changed = self.model.add_edge(source, target);
		self.commit(changed)
	}

	/// Empties the model if `confirm` agrees. Nothing happens otherwise.
	pub fn clear(&mut self, confirm: impl FnOnce() -> bool) -> bool {
		if !confirm() {
			return false;
		}
		let changed = self.model.clear();
		self.commit(changed)
	}

	/// Replaces the model with an imported document. On error the current
	/// model is left untouched.
	pub fn import(&mut self, text: &str) -> Result<()> {
		let (nodes, edges) = persist::decode(text)?;
		info!("imported {} nodes, {} edges", nodes.len(), edges.len());
		self.model.replace(nodes, edges);
		let dangling = self.model.dangling_edges().count();
		if dangling > 0 {
			warn!("import references missing nodes in {dangling} edge(s)");
		}
		self.persist();
		Ok(())
	}

	/// Export document for the current model, stamped with `at`.
	pub fn export(&self, at: DateTime<Utc>) -> Result<String> {
		persist::export(&self.model, at)
	}
}
