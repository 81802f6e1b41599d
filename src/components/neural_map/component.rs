use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::animation::AnimationLoop;
use super::engine::NeuralMap;
use super::params::PhysicsParams;
use super::render::CanvasSurface;
use super::types::GraphData;

type SharedMap = Rc<RefCell<Option<NeuralMap<CanvasSurface>>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas showing `data` as a live force-directed neural map.
///
/// Nodes can be dragged. Setting `paused` stops the animation loop until it
/// is cleared again.
#[component]
pub fn NeuralMapCanvas(
	/// Tree to lay out. A new value replaces the whole graph.
	#[prop(into)]
	data: Signal<GraphData>,
	/// Fill the window and follow its resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width in pixels; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in pixels; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
	/// Freezes the layout while true.
	#[prop(default = None)]
	paused: Option<Signal<bool>>,
	/// Force constants.
	#[prop(default = PhysicsParams::default())]
	params: PhysicsParams,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let map: SharedMap = Rc::new(RefCell::new(None));
	let frames: Rc<RefCell<Option<AnimationLoop>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (map_init, frames_init, resize_cb_init) = (map.clone(), frames.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if map_init.borrow().is_some() {
			return;
		}
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

		let mut engine = NeuralMap::new(CanvasSurface::new(canvas.clone()), params);
		engine.load(&data.get_untracked());
		let start_paused = paused.is_some_and(|p| p.get_untracked());
		if start_paused {
			engine.stop();
		}
		*map_init.borrow_mut() = Some(engine);

		if fullscreen {
			let (map_resize, canvas_resize) = (map_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut m) = *map_resize.borrow_mut() {
					m.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let map_frame = map_init.clone();
		let animation = AnimationLoop::new(move || {
			map_frame
				.borrow_mut()
				.as_mut()
				.is_some_and(|m| m.frame())
		});
		if !start_paused {
			animation.start();
		}
		*frames_init.borrow_mut() = Some(animation);
		debug!("Neural map mounted at {}x{}", w, h);
	});

	let map_data = map.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut m) = *map_data.borrow_mut() {
			m.load(&graph);
		}
	});

	if let Some(paused) = paused {
		let (map_pause, frames_pause) = (map.clone(), frames.clone());
		Effect::new(move |_| {
			let paused = paused.get();
			let (mut map_guard, frames_guard) = (map_pause.borrow_mut(), frames_pause.borrow());
			let (Some(m), Some(animation)) = (map_guard.as_mut(), frames_guard.as_ref()) else {
				return;
			};
			if paused {
				m.stop();
				animation.stop();
			} else {
				m.start();
				animation.start();
			}
		});
	}

	let map_md = map.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut m) = *map_md.borrow_mut() {
			m.begin_drag(x, y);
		}
	};

	let map_mm = map.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut m) = *map_mm.borrow_mut() {
			m.drag_to(x, y);
		}
	};

	let map_mu = map.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut m) = *map_mu.borrow_mut() {
			m.end_drag();
		}
	};

	let map_ml = map.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut m) = *map_ml.borrow_mut() {
			m.end_drag();
		}
	};

	// Cleanup must be Send + Sync; the callbacks only ever live on the main thread.
	let teardown = SendWrapper::new(move || {
		if let Some(animation) = frames.borrow_mut().take() {
			animation.dispose();
		}
		if let Some(cb) = resize_cb.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		map.borrow_mut().take();
		debug!("Neural map unmounted");
	});
	on_cleanup(move || (*teardown)());

	view! {
		<canvas
			node_ref=canvas_ref
			class="neural-map-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}
