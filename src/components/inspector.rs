use leptos::prelude::*;

use crate::app_state::AppState;
use crate::config::IMPACT_UNIT;
use crate::model::{NodeId, NodePatch, coerce_impact};

fn format_impact(value: f64) -> String {
	format!("{value:.2} {IMPACT_UNIT}")
}

/// Side panel editing the selected node, or showing the total when nothing
/// is selected.
#[component]
pub fn Inspector() -> impl IntoView {
	let AppState { workspace, .. } = expect_context::<AppState>();
	let selected = Memo::new(move |_| workspace.with(|ws| ws.model().selected_id().cloned()));

	view! {
		<aside class="inspector">
			{move || match selected.get() {
				Some(id) => view! { <NodeDetails id=id /> }.into_any(),
				None => view! { <Summary /> }.into_any(),
			}}
		</aside>
	}
}

#[component]
fn TotalImpact() -> impl IntoView {
	let AppState { workspace, .. } = expect_context::<AppState>();
	move || format_impact(workspace.with(|ws| ws.model().total_impact()))
}

#[component]
fn Summary() -> impl IntoView {
	view! {
		<div class="inspector-body">
			<h3>"Inspector"</h3>
			<p class="muted">
				"Select a node to edit its details. Impact is expressed in " {IMPACT_UNIT} "."
			</p>
			<div class="total-card">
				"Total model impact: " <strong><TotalImpact /></strong>
			</div>
		</div>
	}
}

#[component]
fn NodeDetails(id: NodeId) -> impl IntoView {
	let AppState { workspace, .. } = expect_context::<AppState>();
	// Inputs are seeded once; nothing but this panel edits them while it is open.
	let Some(node) = workspace.with_untracked(|ws| ws.model().node(&id).cloned()) else {
		return view! { <Summary /> }.into_any();
	};

	let (name_id, impact_id, remove_id) = (id.clone(), id.clone(), id);

	view! {
		<div class="inspector-body">
			<div class="inspector-head">
				<h3>"Node details"</h3>
				<button
					class="link-danger"
					on:click=move |_| {
						workspace
							.update(|ws| {
								ws.remove_node(&remove_id);
							});
					}
				>
					"Remove"
				</button>
			</div>
			<div class="field">
				<label>"Type"</label>
				<div class="kind-chip">{node.kind.label()}</div>
			</div>
			<div class="field">
				<label>"Name"</label>
				<input
					type="text"
					prop:value=node.name
					on:input=move |ev| {
						let name = event_target_value(&ev);
						workspace
							.update(|ws| {
								ws.update_node(&name_id, NodePatch::name(name));
							});
					}
				/>
			</div>
			<div class="field">
				<label>"Impact (" {IMPACT_UNIT} ")"</label>
				// non-numeric text is stored as 0
				<input
					type="number"
					step="0.01"
					prop:value=node.impact.to_string()
					on:input=move |ev| {
						let impact = coerce_impact(&event_target_value(&ev));
						workspace
							.update(|ws| {
								ws.update_node(&impact_id, NodePatch::impact(impact));
							});
					}
				/>
				<p class="hint">"Assign the greenhouse gas impact for this node."</p>
			</div>
			<div class="field total">
				<div class="muted">"Total model impact"</div>
				<div class="total-value">
					<TotalImpact />
				</div>
			</div>
		</div>
	}
	.into_any()
}
