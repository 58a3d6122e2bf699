use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use crate::layout::COMPLEX_COLOR;

const ARROW_LEN: f64 = 6.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#0B0F19");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let nodes = state.sim.nodes();
	let k = state.transform.k;
	let (dash, gap) = (8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for link in state.sim.links() {
		let (src, tgt) = (&nodes[link.source], &nodes[link.target]);
		let (dx, dy) = (tgt.x - src.x, tgt.y - src.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let visual = state.highlight.edge_visual(&src.id, &tgt.id, link.kind, link.strength);

		ctx.set_global_alpha(visual.opacity);
		ctx.set_stroke_style_str(visual.color);
		ctx.set_line_width(visual.width);
		// highlighted causal edges flow from cause to effect
		if visual.arrow {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap)));
			ctx.set_line_dash_offset(dash_offset);
		}
		ctx.begin_path();
		ctx.move_to(src.x, src.y);
		ctx.line_to(tgt.x, tgt.y);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_global_alpha(1.0);

		if visual.arrow && dist > 20.0 {
			let angle = dy.atan2(dx);
			let ax = tgt.x - angle.cos() * (tgt.radius + 4.0);
			let ay = tgt.y - angle.sin() * (tgt.radius + 4.0);
			ctx.begin_path();
			ctx.move_to(ax, ay);
			ctx.line_to(
				ax - ARROW_LEN * (angle - PI / 6.0).cos(),
				ay - ARROW_LEN * (angle - PI / 6.0).sin(),
			);
			ctx.line_to(
				ax - ARROW_LEN * (angle + PI / 6.0).cos(),
				ay - ARROW_LEN * (angle + PI / 6.0).sin(),
			);
			ctx.close_path();
			ctx.set_fill_style_str(visual.color);
			ctx.fill();
		}
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let font_size = (10.0 / k).clamp(9.0, 12.0);
	let has_focus = state.highlight.has_focus();

	for (idx, node) in state.sim.nodes().iter().enumerate() {
		let hovered = state.is_hovered(idx);
		let visual = state.highlight.node_visual(&node.id, node.node_type, hovered && t > 0.01);
		let selected = state.highlight.selected() == Some(node.id.as_str());
		let radius = node.radius * visual.scale;

		ctx.set_global_alpha(visual.opacity);

		if selected || (hovered && t > 0.01) {
			let glow = radius + 6.0;
			if let Ok(gradient) = ctx.create_radial_gradient(node.x, node.y, radius, node.x, node.y, glow) {
				let _ = gradient.add_color_stop(0.0, &format!("{}60", visual.color));
				let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
				ctx.begin_path();
				let _ = ctx.arc(node.x, node.y, glow, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(visual.color);
		ctx.fill();

		if visual.emphasized {
			ctx.set_stroke_style_str(if selected {
				COMPLEX_COLOR
			} else {
				"rgba(255, 255, 255, 0.6)"
			});
			ctx.set_line_width(if selected { 2.0 } else { 1.0 });
			ctx.stroke();
		}

		if k > 0.5 || visual.emphasized {
			let weight = if selected { 600 } else { 400 };
			ctx.set_font(&format!("{weight} {font_size}px 'Pretendard', 'Inter', sans-serif"));
			ctx.set_text_align("center");
			ctx.set_text_baseline("top");
			let fill = if selected {
				COMPLEX_COLOR
			} else if has_focus && !state.highlight.is_connected(&node.id) {
				"rgba(229, 231, 235, 0.2)"
			} else {
				"rgba(229, 231, 235, 0.85)"
			};
			ctx.set_fill_style_str(fill);
			let _ = ctx.fill_text(&node.name, node.x, node.y + radius + 3.0);
		}

		ctx.set_global_alpha(1.0);
	}
}
