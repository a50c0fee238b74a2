use leptos::prelude::*;

use crate::components::flow_canvas::InteractionState;
use crate::model::{BrowserStorage, Workspace};

/// Signals shared by the canvas, toolbar and inspector through context.
#[derive(Clone, Copy)]
pub struct AppState {
	pub workspace: RwSignal<Workspace<BrowserStorage>>,
	pub interaction: RwSignal<InteractionState>,
}

impl AppState {
	/// Restores the saved model from local storage.
	pub fn restore() -> Self {
		Self {
			workspace: RwSignal::new(Workspace::restore(BrowserStorage)),
			interaction: RwSignal::new(InteractionState::default()),
		}
	}
}
