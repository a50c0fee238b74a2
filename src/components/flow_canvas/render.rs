use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{self, EdgeLine};
use super::state::InteractionState;
use crate::config::{IMPACT_UNIT, NODE_HEIGHT, NODE_WIDTH};
use crate::model::{Model, Node};

const EDGE_COLOR: &str = "#6366f1";
const ARROW_SIZE: f64 = 10.0;
const CARD_RADIUS: f64 = 12.0;

pub fn render(
	model: &Model,
	interaction: &InteractionState,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) {
	ctx.set_fill_style_str("#f8fafc");
	ctx.fill_rect(0.0, 0.0, width, height);

	if model.nodes().is_empty() {
		draw_empty_hint(ctx, width, height);
		return;
	}

	for line in geometry::edge_lines(model) {
		draw_edge(ctx, &line);
	}
	let selected = model.selected_id();
	let pending = interaction.pending_source();
	for node in model.nodes() {
		draw_node(
			ctx,
			node,
			selected == Some(&node.id),
			pending == Some(&node.id),
		);
	}
}

fn draw_empty_hint(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_text_align("center");
	ctx.set_fill_style_str("#6b7280");
	ctx.set_font("500 15px sans-serif");
	let _ = ctx.fill_text("Start by adding nodes", width / 2.0, height / 2.0 - 10.0);
	ctx.set_font("13px sans-serif");
	let _ = ctx.fill_text(
		"Use the buttons above to add Process, Input, or Output nodes",
		width / 2.0,
		height / 2.0 + 12.0,
	);
	ctx.set_text_align("start");
}

fn draw_edge(ctx: &CanvasRenderingContext2d, line: &EdgeLine) {
	let ((x1, y1), (x2, y2)) = (line.from, line.to);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (tip_x, tip_y) = line.tip;
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);

	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(2.5);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(back_x, back_y);
	ctx.stroke();

	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn card_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &Node, selected: bool, pending: bool) {
	let (fill, border, dot) = node.kind.palette();
	let (x, y) = (node.x, node.y);

	card_path(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CARD_RADIUS);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(1.0);
	ctx.stroke();

	if selected {
		card_path(ctx, x - 2.0, y - 2.0, NODE_WIDTH + 4.0, NODE_HEIGHT + 4.0, CARD_RADIUS + 2.0);
		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(2.0);
		ctx.stroke();
	}
	if pending {
		card_path(ctx, x - 5.0, y - 5.0, NODE_WIDTH + 10.0, NODE_HEIGHT + 10.0, CARD_RADIUS + 5.0);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(6.0),
			&JsValue::from_f64(4.0),
		));
		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(1.5);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	ctx.begin_path();
	let _ = ctx.arc(x + 17.0, y + 18.0, 5.0, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(dot);
	ctx.fill();

	ctx.set_fill_style_str("#111827");
	ctx.set_font("500 14px sans-serif");
	let _ = ctx.fill_text(&truncate(&node.name, 14), x + 30.0, y + 23.0);
	ctx.set_fill_style_str("#6b7280");
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(node.kind.as_str(), x + 30.0, y + 41.0);

	let badge = format!("{:.2} {IMPACT_UNIT}", node.impact);
	ctx.set_font("600 11px sans-serif");
	ctx.set_text_align("right");
	ctx.set_fill_style_str("#374151");
	let _ = ctx.fill_text(&badge, x + NODE_WIDTH - 10.0, y + NODE_HEIGHT - 10.0);
	ctx.set_text_align("start");
}

fn truncate(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_owned();
	}
	let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
	out.push('…');
	out
}
