use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{ForceGraphState, PointerUp};
use crate::graph::{EdgeKind, GraphStore, ScenarioImpact};

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The 2D causal map.
///
/// Clicking a node toggles `selected`, which puts the layout into focus mode
/// around it. Scenario impacts recolour nodes, the search query dims
/// non-matching nodes and `edge_kinds` picks which relations are laid out.
#[component]
pub fn ForceGraphCanvas(
	store: Arc<GraphStore>,
	selected: RwSignal<Option<String>>,
	#[prop(into)] scenario: Signal<Vec<ScenarioImpact>>,
	#[prop(into)] search: Signal<String>,
	#[prop(into)] edge_kinds: Signal<Vec<EdgeKind>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init, store_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), store.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};

		let mut initial = ForceGraphState::new(&store_init, &edge_kinds.get_untracked(), w, h);
		initial.select(selected.get_untracked().as_deref());
		*state_init.borrow_mut() = Some(initial);
		debug!("force graph canvas mounted at {w}x{h}");

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (state_kinds, store_kinds) = (state.clone(), store.clone());
	Effect::new(move |_| {
		let kinds = edge_kinds.get();
		if let Some(ref mut s) = *state_kinds.borrow_mut() {
			s.rebuild(&store_kinds, &kinds);
		}
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.select(id.as_deref());
		}
	});

	let state_scn = state.clone();
	Effect::new(move |_| {
		let movements: HashMap<String, _> = scenario.with(|impacts| {
			impacts
				.iter()
				.map(|i| (i.node_id.clone(), i.movement))
				.collect()
		});
		if let Some(ref mut s) = *state_scn.borrow_mut() {
			s.set_scenario(movements);
		}
	});

	let (state_q, store_q) = (state.clone(), store.clone());
	Effect::new(move |_| {
		let matches: Option<HashSet<String>> = search.with(|q| {
			store_q
				.search(q)
				.map(|ids| ids.into_iter().map(str::to_owned).collect())
		});
		if let Some(ref mut s) = *state_q.borrow_mut() {
			s.set_search(matches);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_pointer(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let hovering = match *state_mm.borrow_mut() {
			Some(ref mut s) => {
				s.move_pointer(x, y);
				s.hovered_id().is_some()
			}
			None => false,
		};
		if let Some(canvas) = canvas_ref.get_untracked() {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = web_sys::HtmlElement::style(&canvas)
				.set_property("cursor", if hovering { "pointer" } else { "grab" });
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *state_mu.borrow_mut() {
			Some(ref mut s) => match s.end_pointer() {
				PointerUp::ClickNode(idx) => Some(Some(s.sim.nodes()[idx].id.clone())),
				PointerUp::ClickBackground => Some(None),
				PointerUp::Gesture => None,
			},
			None => None,
		};
		// state is released before the selection effect reads it again
		match clicked {
			Some(Some(id)) => selected.update(|sel| {
				*sel = if sel.as_deref() == Some(id.as_str()) {
					None
				} else {
					Some(id)
				}
			}),
			Some(None) => selected.set(None),
			None => {}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
