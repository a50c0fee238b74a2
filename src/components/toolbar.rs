use chrono::Utc;
use leptos::prelude::*;
use log::{error, info, warn};
use web_sys::{Event, HtmlInputElement, MouseEvent};

use crate::app_state::AppState;
use crate::browser;
use crate::config::EXPORT_FILE_NAME;
use crate::error::Error;
use crate::model::NodeKind;

const CLEAR_PROMPT: &str = "Clear all nodes and connections?";

fn import_message(err: &Error) -> &'static str {
	match err {
		Error::Json(_) => "Invalid JSON file",
		Error::InvalidModel(_) => "Invalid model file",
		Error::Storage(_) | Error::Browser(_) => "Could not read the selected file",
	}
}

#[component]
pub fn Toolbar() -> impl IntoView {
	let AppState {
		workspace,
		interaction,
	} = expect_context::<AppState>();
	let file_ref = NodeRef::<leptos::html::Input>::new();

	let add = move |kind: NodeKind| {
		workspace.update(|ws| {
			ws.add_node(kind);
		});
	};

	let toggle_connect = move |_: MouseEvent| interaction.update(|state| state.toggle_connect());
	let connecting = move || interaction.with(|state| state.is_connecting());

	let export = move |_: MouseEvent| {
		let exported = workspace
			.with_untracked(|ws| ws.export(Utc::now()))
			.and_then(|text| browser::download_json(EXPORT_FILE_NAME, &text));
		match exported {
			Ok(()) => info!("exported model as {EXPORT_FILE_NAME}"),
			Err(err) => error!("export failed: {err}"),
		}
	};

	let pick_file = move |_: MouseEvent| {
		if let Some(input) = file_ref.get_untracked() {
			let input: HtmlInputElement = input.into();
			input.click();
		}
	};

	let on_file = move |_: Event| {
		let Some(input) = file_ref.get_untracked() else {
			return;
		};
		let input: HtmlInputElement = input.into();
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		let started = browser::read_text(&file, move |text| {
			let imported = text.and_then(|text| {
				workspace
					.try_update(|ws| ws.import(&text))
					.unwrap_or(Ok(()))
			});
			if let Err(err) = imported {
				warn!("import rejected: {err}");
				browser::alert(import_message(&err));
			}
		});
		if let Err(err) = started {
			error!("cannot read {}: {err}", file.name());
		}
		// allow picking the same file again
		input.set_value("");
	};

	let clear = move |_: MouseEvent| {
		workspace.update(|ws| {
			ws.clear(|| browser::confirm(CLEAR_PROMPT));
		});
	};

	view! {
		<div class="toolbar">
			<div class="container toolbar-row">
				<div class="button-group">
					<button class="btn btn-process" on:click=move |_| add(NodeKind::Process)>
						"+ Process"
					</button>
					<button class="btn btn-input" on:click=move |_| add(NodeKind::Input)>
						"Input"
					</button>
					<button class="btn btn-output" on:click=move |_| add(NodeKind::Output)>
						"Output"
					</button>
				</div>

				<div class="divider" />

				<button
					class=move || if connecting() { "btn btn-connect active" } else { "btn btn-connect" }
					on:click=toggle_connect
				>
					{move || if connecting() { "Connecting…" } else { "Connect nodes" }}
				</button>

				<div class="divider" />

				<button class="btn btn-plain" on:click=export>
					"Export JSON"
				</button>
				<button class="btn btn-plain" on:click=pick_file>
					"Import JSON"
				</button>
				<input
					node_ref=file_ref
					type="file"
					accept="application/json"
					style="display: none;"
					on:change=on_file
				/>

				<div class="spacer" />

				<button class="btn btn-danger" on:click=clear>
					"Clear"
				</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn import_errors_map_to_alerts() {
		let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
		assert_eq!(import_message(&Error::Json(json)), "Invalid JSON file");
		assert_eq!(
			import_message(&Error::InvalidModel("edges missing".into())),
			"Invalid model file"
		);
	}
}
