use leptos::prelude::*;

use crate::app_state::AppState;
use crate::components::flow_canvas::FlowCanvas;
use crate::components::header::Header;
use crate::components::inspector::Inspector;
use crate::components::toolbar::Toolbar;
use crate::config::IMPACT_UNIT;

/// Editor page: toolbar, canvas, inspector and a footer with the total.
#[component]
pub fn Home() -> impl IntoView {
	let AppState { workspace, .. } = expect_context::<AppState>();
	let total = move || format!("{:.2} {IMPACT_UNIT}", workspace.with(|ws| ws.model().total_impact()));

	view! {
		<div class="app">
			<Header />
			<Toolbar />

			<main class="container workspace">
				<div class="canvas-pane">
					<FlowCanvas />
				</div>
				<Inspector />
			</main>

			<footer class="app-footer">
				<div class="container footer-row">
					<span>"Total model impact: " <strong>{total}</strong></span>
					<span class="muted">"Drag nodes to arrange. Use Connect to link them."</span>
				</div>
			</footer>
		</div>
	}
}
