use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::geometry;
use super::render;
use crate::app_state::AppState;
use crate::config::FALLBACK_CANVAS_SIZE;

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn measure(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	let (fw, fh) = FALLBACK_CANVAS_SIZE;
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(fw)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(fh)
		}),
	)
}

#[component]
pub fn FlowCanvas(
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let AppState {
		workspace,
		interaction,
	} = expect_context::<AppState>();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let size = RwSignal::new(FALLBACK_CANVAS_SIZE);
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Size once mounted, then follow window resizes.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		size.set(measure(&canvas, width, height));

		if resize_cb.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let cb = Closure::<dyn FnMut()>::new(move || {
			size.set(measure(&canvas, width, height));
		});
		if let Err(err) = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref()) {
			log::warn!("resize listener not installed: {err:?}");
		}
		*resize_cb.borrow_mut() = Some(cb);
	});

	// Redraw whenever the model, the gesture state or the size changes.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = size.get();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx,
			_ => {
				log::error!("2d canvas context unavailable");
				return;
			}
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};
		workspace.with(|ws| {
			interaction.with(|state| render::render(ws.model(), state, &ctx, w, h));
		});
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let hit = workspace.with_untracked(|ws| geometry::node_at(ws.model().nodes(), x, y).cloned());
		interaction.update(|state| state.pointer_down(hit.as_ref(), x, y));
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(action) = interaction.with_untracked(|state| state.pointer_move(x, y)) {
			workspace.update(|ws| {
				action.apply(ws);
			});
		}
	};

	let end_drag = move |_: MouseEvent| {
		if interaction.with_untracked(|state| state.drag.is_some()) {
			interaction.update(|state| state.pointer_up());
		}
	};

	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let hit = workspace
			.with_untracked(|ws| geometry::node_at(ws.model().nodes(), x, y).map(|n| n.id.clone()));
		let action = interaction
			.try_update(|state| state.click(hit.as_ref()))
			.flatten();
		if let Some(action) = action {
			workspace.update(|ws| {
				action.apply(ws);
			});
		}
	};

	let cursor = move || {
		if interaction.with(|state| state.is_connecting()) {
			"display: block; width: 100%; height: 100%; cursor: crosshair;"
		} else {
			"display: block; width: 100%; height: 100%; cursor: grab;"
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="flow-canvas"
			aria-label="flowchart canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=end_drag
			on:mouseleave=end_drag
			on:click=on_click
			style=cursor
		/>
	}
}
