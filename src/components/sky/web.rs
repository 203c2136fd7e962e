//! DOM-backed rendering for particles and shooting stars.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function, Object, Reflect};
use log::{error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Animation, Document, Element, HtmlElement, Window};

use super::error::{HostError, JsResultExt};
use super::particles::{Particle, ParticleField};
use super::rng::RandomSource;
use super::stars::{StarFlight, StarId, StarScheduler, StarStage, StarTiming};
use super::tasks::Timers;
use super::types::Viewport;

/// `Math.random()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl RandomSource for MathRandom {
	fn next_f64(&mut self) -> f64 {
		js_sys::Math::random()
	}
}

pub(crate) fn document(window: &Window) -> Result<Document, HostError> {
	window.document().ok_or(HostError::NoDocument)
}

/// `innerWidth` x `innerHeight`, or an empty viewport if the window has none.
pub fn viewport_of(window: &Window) -> Viewport {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

pub(crate) fn create_div(document: &Document, class: &str) -> Result<HtmlElement, HostError> {
	let element = document.create_element("div").context("createElement")?;
	element.set_class_name(class);
	element
		.dyn_into::<HtmlElement>()
		.map_err(|el| HostError::js("HtmlElement cast", el.into()))
}

fn translate(x: f64, y: f64) -> String {
	format!("translate({}px, {}px)", x, y)
}

/// One `div.particle` per particle, in field order.
pub struct ParticleLayer {
	elements: Vec<HtmlElement>,
}

impl ParticleLayer {
	/// Create and style one element per particle at its spawn position.
	pub fn mount(
		document: &Document,
		container: &Element,
		field: &ParticleField,
	) -> Result<Self, HostError> {
		let mut elements = Vec::with_capacity(field.len());
		for p in &field.particles {
			let el = create_div(document, "particle")?;
			let style = el.style();
			let size = format!("{}px", p.size);
			let _ = style.set_property("width", &size);
			let _ = style.set_property("height", &size);
			let _ = style.set_property("animation-duration", &format!("{}s", p.twinkle_secs));
			let _ = style.set_property("animation-delay", &format!("{}s", p.twinkle_delay_secs));
			let _ = style.set_property("opacity", &p.opacity.to_string());
			let _ = style.set_property("transform", &translate(p.x, p.y));
			container.append_child(&el).context("appendChild")?;
			elements.push(el);
		}
		Ok(Self { elements })
	}

	/// Move the element for `index` to the particle's position.
	pub fn place(&self, index: usize, particle: &Particle) {
		if let Some(el) = self.elements.get(index) {
			let _ = el
				.style()
				.set_property("transform", &translate(particle.x, particle.y));
		}
	}

	/// Remove every particle element.
	pub fn clear(&mut self) {
		for el in self.elements.drain(..) {
			el.remove();
		}
	}
}

/// The scheduler together with the DOM stage it drives.
///
/// Timer and animation callbacks hold a weak reference to this and borrow it
/// only for the duration of one scheduler call.
pub struct StarSystem {
	scheduler: StarScheduler<MathRandom>,
	stage: DomStarStage,
}

impl StarSystem {
	/// Stars are appended to `container`.
	pub fn new(
		scheduler: StarScheduler<MathRandom>,
		document: Document,
		container: Element,
	) -> Rc<RefCell<Self>> {
		Rc::new_cyclic(|me| {
			RefCell::new(Self {
				scheduler,
				stage: DomStarStage {
					document,
					container,
					timers: Timers::new(),
					flying: HashMap::new(),
					system: me.clone(),
				},
			})
		})
	}

	/// Arm the startup timers.
	pub fn start(&mut self) {
		let Self { scheduler, stage } = self;
		scheduler.start(stage);
	}

	fn spawn(&mut self) {
		let Self { scheduler, stage } = self;
		scheduler.create_star(stage);
	}

	fn land(&mut self, id: StarId) {
		let Self { scheduler, stage } = self;
		scheduler.finish_star(id, stage);
	}

	/// Cancel pending spawns and clear every star still on screen.
	pub fn stop(&mut self) {
		for id in self.scheduler.stop() {
			self.stage.abort(id);
		}
		self.stage.timers.cancel_all();
	}
}

/// A star on screen and the callback that lands it.
struct InFlight {
	element: HtmlElement,
	animation: Animation,
	_on_finish: Closure<dyn FnMut()>,
}

struct DomStarStage {
	document: Document,
	container: Element,
	timers: Timers,
	flying: HashMap<StarId, InFlight>,
	system: Weak<RefCell<StarSystem>>,
}

impl DomStarStage {
	fn keyframes(flight: &StarFlight) -> Result<Array, HostError> {
		let frames = Array::new();
		for (opacity, dx, dy) in flight.offsets() {
			let frame = Object::new();
			Reflect::set(&frame, &"opacity".into(), &opacity.into()).context("keyframe")?;
			Reflect::set(&frame, &"transform".into(), &translate(dx, dy).into()).context("keyframe")?;
			frames.push(&frame);
		}
		Ok(frames)
	}

	fn options(timing: &StarTiming) -> Result<Object, HostError> {
		let options = Object::new();
		Reflect::set(&options, &"duration".into(), &timing.duration_ms.into())
			.context("animation options")?;
		Reflect::set(&options, &"easing".into(), &timing.easing.to_css().into())
			.context("animation options")?;
		Reflect::set(&options, &"fill".into(), &timing.fill_css().into())
			.context("animation options")?;
		Ok(options)
	}

	/// `el.animate(frames, options)`, looked up dynamically.
	fn animate(el: &Element, frames: &Array, options: &Object) -> Result<Animation, HostError> {
		let animate: Function = Reflect::get(el, &"animate".into())
			.context("Element.animate")?
			.dyn_into()
			.map_err(|v| HostError::js("Element.animate", v))?;
		animate
			.call2(el, frames, options)
			.context("Element.animate")?
			.dyn_into::<Animation>()
			.map_err(|v| HostError::js("Animation cast", v))
	}

	fn try_launch(&mut self, id: StarId, flight: &StarFlight) -> Result<(), HostError> {
		let frames = Self::keyframes(flight)?;
		let options = Self::options(&flight.timing)?;
		let el = create_div(&self.document, "shooting-star")?;
		let style = el.style();
		let _ = style.set_property("left", &format!("{}px", flight.start.0));
		let _ = style.set_property("top", &format!("{}px", flight.start.1));
		let _ = style.set_property("animation", "none");
		let _ = style.set_property("transform", "translate(0, 0)");
		self.container.append_child(&el).context("appendChild")?;

		let animation = match Self::animate(&el, &frames, &options) {
			Ok(animation) => animation,
			Err(e) => {
				el.remove();
				return Err(e);
			}
		};

		let system = self.system.clone();
		let on_finish = Closure::<dyn FnMut()>::new(move || {
			if let Some(system) = system.upgrade() {
				system.borrow_mut().land(id);
			}
		});
		animation.set_onfinish(Some(on_finish.as_ref().unchecked_ref()));

		self.flying.insert(
			id,
			InFlight {
				element: el,
				animation,
				_on_finish: on_finish,
			},
		);
		Ok(())
	}

	/// Remove a star without waiting for its animation to end.
	fn abort(&mut self, id: StarId) {
		if let Some(star) = self.flying.remove(&id) {
			star.animation.set_onfinish(None);
			star.animation.cancel();
			star.element.remove();
		}
	}
}

impl StarStage for DomStarStage {
	fn viewport(&self) -> Viewport {
		web_sys::window()
			.map(|w| viewport_of(&w))
			.unwrap_or(Viewport::new(0.0, 0.0))
	}

	fn arm_spawn(&mut self, delay_ms: f64) {
		let system = self.system.clone();
		let armed = self.timers.set(delay_ms, move || {
			if let Some(system) = system.upgrade() {
				system.borrow_mut().spawn();
			}
		});
		if let Err(e) = armed {
			error!("night-sky: could not arm star timer: {}", e);
		}
	}

	fn launch(&mut self, id: StarId, flight: &StarFlight) {
		if let Err(e) = self.try_launch(id, flight) {
			// Land it straight away so the scheduler frees the slot and re-arms.
			warn!("night-sky: shooting star #{} failed to launch: {}", id, e);
			let system = self.system.clone();
			let _ = self.timers.set(0.0, move || {
				if let Some(system) = system.upgrade() {
					system.borrow_mut().land(id);
				}
			});
		}
	}

	fn retire(&mut self, id: StarId) {
		// Dropping the entry frees its `onfinish` closure, even when called from it.
		if let Some(star) = self.flying.remove(&id) {
			star.element.remove();
		}
	}
}
