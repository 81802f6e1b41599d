use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

type FrameFn = Rc<RefCell<Option<Box<dyn FnMut() -> bool>>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that can be cancelled, restarted and
/// finally disposed.
///
/// The frame function returns whether it wants another frame. The browser
/// callback is only created on the first [`AnimationLoop::start`].
#[derive(Clone)]
pub struct AnimationLoop {
	on_frame: FrameFn,
	callback: FrameCallback,
	request_id: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
	/// Wraps `on_frame` without scheduling anything yet.
	pub fn new(on_frame: impl FnMut() -> bool + 'static) -> Self {
		Self {
			on_frame: Rc::new(RefCell::new(Some(Box::new(on_frame)))),
			callback: Rc::new(RefCell::new(None)),
			request_id: Rc::new(Cell::new(None)),
		}
	}

	/// Requests a frame unless one is pending or the loop was disposed.
	pub fn start(&self) {
		if self.is_disposed() || self.is_pending() {
			return;
		}
		if self.callback.borrow().is_none() {
			let (on_frame, callback, request_id) = (
				self.on_frame.clone(),
				self.callback.clone(),
				self.request_id.clone(),
			);
			*self.callback.borrow_mut() = Some(Closure::new(move || {
				request_id.set(None);
				let again = on_frame.borrow_mut().as_mut().is_some_and(|f| f());
				if again {
					schedule(&callback, &request_id);
				}
			}));
		}
		schedule(&self.callback, &self.request_id);
	}

	/// Cancels the pending frame, if there is one.
	pub fn stop(&self) {
		let Some(id) = self.request_id.take() else {
			return;
		};
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(id);
		}
	}

	/// Stops the loop for good and drops the frame function and the browser
	/// callback, breaking the callback's reference to itself.
	pub fn dispose(&self) {
		self.stop();
		self.on_frame.borrow_mut().take();
		self.callback.borrow_mut().take();
	}

	/// True once [`AnimationLoop::dispose`] has run.
	pub fn is_disposed(&self) -> bool {
		self.on_frame.borrow().is_none()
	}

	/// True while a frame request is outstanding.
	pub fn is_pending(&self) -> bool {
		self.request_id.get().is_some()
	}
}

fn schedule(callback: &FrameCallback, request_id: &Cell<Option<i32>>) {
	let guard = callback.borrow();
	let Some(cb) = guard.as_ref() else {
		return;
	};
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		request_id.set(Some(id));
	}
}
