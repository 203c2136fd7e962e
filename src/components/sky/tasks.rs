//! Cancellable handles over the browser's recurring callbacks.
//!
//! `requestAnimationFrame` and `setTimeout` chains normally live until the page
//! closes. Each handle here owns its JS closure and tears the chain down when
//! stopped or dropped, so an unmounted component leaves nothing running.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

use super::error::{HostError, JsResultExt};

pub(crate) fn window() -> Result<Window, HostError> {
	web_sys::window().ok_or(HostError::NoWindow)
}

struct LoopState {
	running: Cell<bool>,
	frame_id: Cell<Option<i32>>,
	callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
	fn request_frame(&self) -> Result<(), HostError> {
		let window = window()?;
		if let Some(ref cb) = *self.callback.borrow() {
			let id = window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.context("requestAnimationFrame")?;
			self.frame_id.set(Some(id));
		}
		Ok(())
	}
}

/// A self-rearming `requestAnimationFrame` loop.
///
/// The tick receives the frame timestamp in milliseconds. Stopping cancels
/// the pending frame; the loop cannot be restarted.
pub struct AnimationLoop {
	state: Rc<LoopState>,
}

impl AnimationLoop {
	/// Request the first frame and keep re-requesting after every tick.
	pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, HostError> {
		let state = Rc::new(LoopState {
			running: Cell::new(true),
			frame_id: Cell::new(None),
			callback: RefCell::new(None),
		});

		let inner: Weak<LoopState> = Rc::downgrade(&state);
		*state.callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			let Some(state) = inner.upgrade() else {
				return;
			};
			state.frame_id.set(None);
			if !state.running.get() {
				return;
			}
			tick(now);
			if state.running.get() {
				if let Err(e) = state.request_frame() {
					error!("night-sky: animation loop halted: {}", e);
					state.running.set(false);
				}
			}
		}));

		state.request_frame()?;
		Ok(Self { state })
	}

	/// Cancel the pending frame. Idempotent.
	pub fn stop(&self) {
		self.state.running.set(false);
		if let (Some(id), Some(window)) = (self.state.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Callbacks keyed by the browser handle that will run them.
#[derive(Debug)]
pub(crate) struct CallbackSet<C> {
	entries: HashMap<i32, C>,
}

impl<C> Default for CallbackSet<C> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}
}

impl<C> CallbackSet<C> {
	pub(crate) fn insert(&mut self, id: i32, callback: C) {
		self.entries.insert(id, callback);
	}

	pub(crate) fn take(&mut self, id: i32) -> Option<C> {
		self.entries.remove(&id)
	}

	/// Empty the set, returning every handle with its callback.
	pub(crate) fn drain(&mut self) -> Vec<(i32, C)> {
		self.entries.drain().collect()
	}
}

/// A set of one-shot `setTimeout` callbacks that can be cancelled together.
///
/// The set owns each callback's closure until it fires or is cancelled.
/// Clones share the same pending set.
#[derive(Clone, Default)]
pub struct Timers {
	pending: Rc<RefCell<CallbackSet<Closure<dyn FnMut()>>>>,
}

impl Timers {
	/// An empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Run `f` once after `delay_ms`. Returns the browser's timer id.
	pub fn set(&self, delay_ms: f64, f: impl FnOnce() + 'static) -> Result<i32, HostError> {
		let window = window()?;
		let own_id = Rc::new(Cell::new(None::<i32>));
		let (pending, slot) = (Rc::downgrade(&self.pending), own_id.clone());

		let mut f = Some(f);
		let callback = Closure::<dyn FnMut()>::new(move || {
			// Held until `f` returns; wasm-bindgen defers the free while running.
			let _own = match (pending.upgrade(), slot.get()) {
				(Some(pending), Some(id)) => pending.borrow_mut().take(id),
				_ => None,
			};
			if let Some(f) = f.take() {
				f();
			}
		});

		let id = window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				delay_ms.round() as i32,
			)
			.context("setTimeout")?;
		own_id.set(Some(id));
		self.pending.borrow_mut().insert(id, callback);
		Ok(id)
	}

	/// Clear every timer that has not fired yet and free its closure.
	pub fn cancel_all(&self) {
		let entries = self.pending.borrow_mut().drain();
		let window = web_sys::window();
		for (id, callback) in entries {
			if let Some(window) = &window {
				window.clear_timeout_with_handle(id);
			}
			drop(callback);
		}
	}
}

/// A `setInterval` callback, cleared on drop.
pub struct Interval {
	id: i32,
	_callback: Closure<dyn FnMut()>,
}

impl Interval {
	/// Call `f` every `period_ms`.
	pub fn start(period_ms: f64, f: impl FnMut() + 'static) -> Result<Self, HostError> {
		let callback = Closure::<dyn FnMut()>::new(f);
		let id = window()?
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				period_ms.round() as i32,
			)
			.context("setInterval")?;
		Ok(Self {
			id,
			_callback: callback,
		})
	}
}

impl Drop for Interval {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(self.id);
		}
	}
}

/// A DOM event listener, removed on drop.
pub struct EventListener {
	target: EventTarget,
	kind: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	/// Add `f` as a `kind` listener on `target`.
	pub fn new(
		target: &EventTarget,
		kind: &'static str,
		f: impl FnMut(Event) + 'static,
	) -> Result<Self, HostError> {
		let callback = Closure::<dyn FnMut(Event)>::new(f);
		target
			.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
			.context("addEventListener")?;
		Ok(Self {
			target: target.clone(),
			kind,
			callback,
		})
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn taking_a_callback_removes_only_that_entry() {
		let mut set = CallbackSet::default();
		set.insert(1, "spawn");
		set.insert(2, "land");
		assert_eq!(set.take(1), Some("spawn"));
		assert_eq!(set.take(1), None);
		assert_eq!(set.drain(), vec![(2, "land")]);
	}

	#[test]
	fn draining_releases_every_callback() {
		let owner = Rc::new(());
		let mut set = CallbackSet::default();
		for id in 0..3 {
			set.insert(id, owner.clone());
		}
		assert_eq!(Rc::strong_count(&owner), 4);

		let mut drained = set.drain();
		drained.sort_by_key(|(id, _)| *id);
		assert_eq!(drained.iter().map(|(id, _)| *id).collect::<Vec<_>>(), [0, 1, 2]);
		assert!(set.drain().is_empty());

		drop(drained);
		assert_eq!(Rc::strong_count(&owner), 1);
	}
}
