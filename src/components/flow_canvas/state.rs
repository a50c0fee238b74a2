use log::debug;

use crate::model::{Node, NodeId, Storage, Workspace};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mode {
	#[default]
	Select,
	/// Waiting for two node clicks. `pending` is the armed source, if any.
	Connect { pending: Option<NodeId> },
}

/// A node being dragged, with the grab point relative to its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
	pub node: NodeId,
	pub offset_x: f64,
	pub offset_y: f64,
}

/// What a gesture asks the workspace to do.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasAction {
	Select(Option<NodeId>),
	Move { id: NodeId, x: f64, y: f64 },
	Connect { source: NodeId, target: NodeId },
}

impl CanvasAction {
	/// Returns `true` if nodes or edges changed.
	pub fn apply<S: Storage>(self, workspace: &mut Workspace<S>) -> bool {
		match self {
			CanvasAction::Select(id) => {
				workspace.select(id);
				false
			}
			CanvasAction::Move { id, x, y } => workspace.move_node(&id, x, y),
			CanvasAction::Connect { source, target } => workspace.add_edge(Some(&source), &target),
		}
	}
}

/// Transient pointer state of the canvas. Never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	pub mode: Mode,
	pub drag: Option<DragState>,
}

impl InteractionState {
	pub fn is_connecting(&self) -> bool {
		matches!(self.mode, Mode::Connect { .. })
	}

	pub fn pending_source(&self) -> Option<&NodeId> {
		match &self.mode {
			Mode::Connect { pending } => pending.as_ref(),
			Mode::Select => None,
		}
	}

	/// Flips between select and connect mode. Either way no source stays armed.
	pub fn toggle_connect(&mut self) {
		self.mode = match self.mode {
			Mode::Select => Mode::Connect { pending: None },
			Mode::Connect { .. } => Mode::Select,
		};
	}

	/// Pointer pressed at `(x, y)`; starts a drag when it landed on `hit`.
	pub fn pointer_down(&mut self, hit: Option<&Node>, x: f64, y: f64) {
		self.drag = hit.map(|node| DragState {
			node: node.id.clone(),
			offset_x: x - node.x,
			offset_y: y - node.y,
		});
	}

	/// Pointer moved to `(x, y)`. While dragging, keeps the grab point under
	/// the pointer.
	pub fn pointer_move(&self, x: f64, y: f64) -> Option<CanvasAction> {
		let drag = self.drag.as_ref()?;
		Some(CanvasAction::Move {
			id: drag.node.clone(),
			x: (x - drag.offset_x).max(0.0),
			y: (y - drag.offset_y).max(0.0),
		})
	}

	pub fn pointer_up(&mut self) {
		self.drag = None;
	}

	/// A click on `hit` (a node id) or on empty canvas (`None`).
	pub fn click(&mut self, hit: Option<&NodeId>) -> Option<CanvasAction> {
		let Some(id) = hit else {
			return Some(CanvasAction::Select(None));
		};
		match &self.mode {
			Mode::Select => Some(CanvasAction::Select(Some(id.clone()))),
			Mode::Connect { pending: None } => {
				self.mode = Mode::Connect {
					pending: Some(id.clone()),
				};
				None
			}
			Mode::Connect {
				pending: Some(source),
			} if source == id => {
				debug!("connect: {id} is already the source, still waiting for a target");
				None
			}
			Mode::Connect {
				pending: Some(source),
			} => {
				let action = CanvasAction::Connect {
					source: source.clone(),
					target: id.clone(),
				};
				self.mode = Mode::Select;
				Some(action)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::model::{MemoryStorage, NodeKind};

	fn workspace_with(n: usize) -> (Workspace<MemoryStorage>, Vec<NodeId>) {
		let mut ws = Workspace::restore(MemoryStorage::default());
		let ids = (0..n).map(|_| ws.add_node(NodeKind::Process)).collect();
		(ws, ids)
	}

	#[test]
	fn drag_keeps_grab_offset() {
		let (mut ws, ids) = workspace_with(1);
		let node = ws.model().node(&ids[0]).unwrap().clone();
		assert_eq!(node.x, 60.0);

		let mut state = InteractionState::default();
		state.pointer_down(Some(&node), 70.0, 100.0);
		let action = state.pointer_move(200.0, 300.0).unwrap();
		assert_eq!(
			action,
			CanvasAction::Move {
				id: node.id.clone(),
				x: 190.0,
				y: 280.0,
			}
		);
		assert!(action.apply(&mut ws));
		let moved = ws.model().node(&node.id).unwrap();
		assert_eq!((moved.x, moved.y), (190.0, 280.0));

		state.pointer_up();
		assert_eq!(state.pointer_move(10.0, 10.0), None);
	}

	#[test]
	fn drag_clamps_at_origin() {
		let (ws, ids) = workspace_with(1);
		let node = ws.model().node(&ids[0]).unwrap();
		let mut state = InteractionState::default();
		state.pointer_down(Some(node), 65.0, 85.0);
		assert_eq!(
			state.pointer_move(2.0, 1.0),
			Some(CanvasAction::Move {
				id: node.id.clone(),
				x: 0.0,
				y: 0.0,
			})
		);
	}

	#[test]
	fn press_on_background_does_not_drag() {
		let mut state = InteractionState::default();
		state.pointer_down(None, 5.0, 5.0);
		assert_eq!(state.drag, None);
		assert_eq!(state.pointer_move(50.0, 50.0), None);
	}

	#[test]
	fn drag_of_removed_node_is_a_no_op() {
		let (mut ws, ids) = workspace_with(1);
		let node = ws.model().node(&ids[0]).unwrap().clone();
		let mut state = InteractionState::default();
		state.pointer_down(Some(&node), 70.0, 90.0);
		ws.remove_node(&node.id);

		let action = state.pointer_move(100.0, 100.0).unwrap();
		assert!(!action.apply(&mut ws));
		assert!(ws.model().nodes().is_empty());
	}

	#[test]
	fn select_mode_clicks_select_and_deselect() {
		let (mut ws, ids) = workspace_with(2);
		let mut state = InteractionState::default();

		state.click(Some(&ids[0])).unwrap().apply(&mut ws);
		assert_eq!(ws.model().selected_id(), Some(&ids[0]));

		state.click(None).unwrap().apply(&mut ws);
		assert_eq!(ws.model().selected_id(), None);
	}

	#[test]
	fn connect_two_clicks_adds_edge_and_exits() {
		let (mut ws, ids) = workspace_with(2);
		let mut state = InteractionState::default();
		state.toggle_connect();
		assert!(state.is_connecting());

		assert_eq!(state.click(Some(&ids[0])), None);
		assert_eq!(state.pending_source(), Some(&ids[0]));

		let action = state.click(Some(&ids[1])).unwrap();
		assert!(action.apply(&mut ws));
		assert_eq!(ws.model().edges().len(), 1);
		assert_eq!(state.mode, Mode::Select);
		assert_eq!(state.pending_source(), None);
	}

	#[test]
	fn duplicate_connect_still_exits_mode() {
		let (mut ws, ids) = workspace_with(2);
		ws.add_edge(Some(&ids[0]), &ids[1]);
		let mut state = InteractionState::default();
		state.toggle_connect();
		state.click(Some(&ids[0]));

		let action = state.click(Some(&ids[1])).unwrap();
		assert!(!action.apply(&mut ws));
		assert_eq!(ws.model().edges().len(), 1);
		assert_eq!(state.mode, Mode::Select);
	}

	#[test]
	fn same_node_twice_stays_armed() {
		let (_, ids) = workspace_with(1);
		let mut state = InteractionState::default();
		state.toggle_connect();
		state.click(Some(&ids[0]));

		assert_eq!(state.click(Some(&ids[0])), None);
		assert_eq!(state.pending_source(), Some(&ids[0]));
		assert!(state.is_connecting());
	}

	#[test]
	fn toggling_clears_pending_source() {
		let (_, ids) = workspace_with(1);
		let mut state = InteractionState::default();
		state.toggle_connect();
		state.click(Some(&ids[0]));

		state.toggle_connect();
		assert_eq!(state.mode, Mode::Select);
		state.toggle_connect();
		assert_eq!(state.mode, Mode::Connect { pending: None });
	}

	#[test]
	fn background_click_in_connect_mode_keeps_source() {
		let (_, ids) = workspace_with(1);
		let mut state = InteractionState::default();
		state.toggle_connect();
		state.click(Some(&ids[0]));

		assert_eq!(state.click(None), Some(CanvasAction::Select(None)));
		assert_eq!(state.pending_source(), Some(&ids[0]));
	}
}
