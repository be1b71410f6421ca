//! Leptos component wrapping the graph canvas.
//!
//! The component creates an HTML canvas element and forwards mouse and wheel
//! input to [`GraphState`]. An animation loop runs via `requestAnimationFrame`,
//! running one engine frame and painting the records each time.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::canvas::CanvasSurface;
use super::config::GraphConfig;
use super::geometry::SizeConfig;
use super::state::GraphState;
use super::types::{GraphData, PlotKind};
use super::viewport::Modifiers;

/// Engine state plus mount-time bookkeeping.
struct GraphContext {
	state: GraphState,
	/// Set once the first layout has been framed.
	fitted: bool,
}

fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map_or(0.0, |p| p.now())
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn modifiers(ev: &MouseEvent) -> Modifiers {
	Modifiers {
		ctrl: ev.ctrl_key(),
		shift: ev.shift_key(),
		alt: ev.alt_key(),
		meta: ev.meta_key(),
	}
}

/// Pointer position relative to the canvas.
fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive graph or tree on a canvas element.
///
/// Pass graph data via the reactive `data` signal; later values are merged
/// into the running layout, keeping positions of vertices that persist. The
/// component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window. Plot
/// kinds other than graph and tree render an empty canvas.
#[component]
pub fn GraphCanvas(
	/// Graph data; each new value is merged into the running layout.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Engine configuration, read once at mount.
	#[prop(default = GraphConfig::default())]
	config: GraphConfig,
	/// Plot kind to draw.
	#[prop(default = PlotKind::Graph)]
	kind: PlotKind,
	/// Fill the window and follow its size.
	#[prop(default = false)]
	fullscreen: bool,
	/// Canvas width in pixels; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Canvas height in pixels; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let parent = canvas.parent_element();
		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((config.size.width, config.size.height))
		} else {
			(
				width.unwrap_or_else(|| {
					parent
						.as_ref()
						.map_or(config.size.width, |p| p.client_width() as f64)
				}),
				height.unwrap_or_else(|| {
					parent
						.as_ref()
						.map_or(config.size.height, |p| p.client_height() as f64)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("graph: canvas has no 2d context");
				return;
			}
		};

		let config = GraphConfig {
			size: SizeConfig {
				width: w,
				height: h,
				..config.size
			},
			..config.clone()
		};
		let Some(mut state) = GraphState::for_kind(kind, config) else {
			return;
		};
		if let Err(e) = state.set_data(data.get_untracked()) {
			warn!("graph: rejected graph data: {e}");
		}
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			fitted: false,
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.frame(now_ms());
				if !c.fitted && !c.state.simulation().is_running() {
					c.state.zoom_to_fit();
					c.fitted = true;
				}
				c.state.paint(&mut CanvasSurface::new(&ctx));
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_data = context.clone();
	Effect::new(move |_| {
		let next = data.get();
		if let Some(ref mut c) = *context_data.borrow_mut() {
			if let Err(e) = c.state.set_data(next) {
				warn!("graph: rejected graph data: {e}");
			}
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y, ev.button(), modifiers(&ev));
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.pointer_move(x, y);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up(x, y, now_ms());
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(x, y, ev.delta_y(), modifiers(&ev));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
