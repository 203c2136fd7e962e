//! Leptos component hosting the sky effects.
//!
//! The component renders the particle container and the code snippet overlay,
//! then starts every effect once the container is in the DOM: a
//! `requestAnimationFrame` loop for the particles, `mousemove`/`resize`
//! listeners, the shooting star timers, the snippet interval, and the page
//! observer. All of them stop when the component is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use super::config::{DebugFlags, SkyConfig};
use super::error::HostError;
use super::monitor::FrameMonitor;
use super::page::PageObserver;
use super::particles::ParticleField;
use super::pointer::PointerState;
use super::snippets::SnippetRotator;
use super::stars::StarScheduler;
use super::tasks::{AnimationLoop, EventListener, Interval, window};
use super::types::SnippetList;
use super::web::{MathRandom, ParticleLayer, StarSystem, document, viewport_of};

/// Particle state touched by the frame loop and the pointer/resize listeners.
struct ParticleScene {
	field: ParticleField,
	pointer: PointerState,
	layer: ParticleLayer,
	monitor: FrameMonitor,
	debug: DebugFlags,
}

impl ParticleScene {
	fn frame(&mut self, now: f64) {
		let Self {
			field,
			pointer,
			layer,
			monitor,
			debug,
		} = self;
		field.tick(pointer, |i, p| layer.place(i, p));

		if let Some(fps) = monitor.frame(now) {
			if debug.particles {
				debug!(
					target: "particles",
					"[PARTICLES] performance: fps={} activeParticles={}",
					fps,
					field.len()
				);
			}
		}
	}
}

/// Every running effect. Dropping it stops them all.
pub struct SkyEffects {
	particles: Option<Rc<RefCell<ParticleScene>>>,
	frame_loop: Option<AnimationLoop>,
	stars: Option<Rc<RefCell<StarSystem>>>,
	snippets: Option<Interval>,
	page: Option<PageObserver>,
	listeners: Vec<EventListener>,
}

impl SkyEffects {
	/// Start the effects enabled in `config`.
	///
	/// Particles and stars are placed in `container`; snippets are shown in
	/// `code_effect` when one is given.
	pub fn start(
		container: &Element,
		code_effect: Option<&HtmlElement>,
		snippets: SnippetList,
		config: &SkyConfig,
	) -> Result<Self, HostError> {
		let window = window()?;
		let document = document(&window)?;
		let mut effects = Self {
			particles: None,
			frame_loop: None,
			stars: None,
			snippets: None,
			page: None,
			listeners: Vec::new(),
		};

		if config.particles.enabled {
			let mut rng = MathRandom;
			let field = ParticleField::new(
				&config.particles,
				&config.pointer,
				viewport_of(&window),
				&mut rng,
			);
			let layer = ParticleLayer::mount(&document, container, &field)?;
			let scene = Rc::new(RefCell::new(ParticleScene {
				field,
				pointer: PointerState::default(),
				layer,
				monitor: FrameMonitor::default(),
				debug: config.debug,
			}));

			let scene_mm = scene.clone();
			let log_mouse = config.debug.mouse;
			effects.listeners.push(EventListener::new(&document, "mousemove", move |ev| {
				let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
					return;
				};
				let mut scene = scene_mm.borrow_mut();
				scene
					.pointer
					.move_to(ev.client_x() as f64, ev.client_y() as f64);
				if log_mouse {
					debug!(
						target: "mouse",
						"[MOUSE] position x={} y={} speed={:.2}",
						scene.pointer.x,
						scene.pointer.y,
						scene.pointer.speed()
					);
				}
			})?);

			let scene_rs = scene.clone();
			effects.listeners.push(EventListener::new(&window, "resize", move |_| {
				if let Some(win) = web_sys::window() {
					scene_rs.borrow_mut().field.resize(viewport_of(&win));
				}
			})?);

			let scene_anim = scene.clone();
			effects.frame_loop = Some(AnimationLoop::start(move |now| {
				scene_anim.borrow_mut().frame(now);
			})?);
			effects.particles = Some(scene);
		}

		if config.stars.enabled {
			let scheduler =
				StarScheduler::new(&config.stars, MathRandom).with_logging(config.debug.stars);
			let stars = StarSystem::new(scheduler, document.clone(), container.clone());
			stars.borrow_mut().start();
			effects.stars = Some(stars);
		}

		if let (true, Some(code)) = (config.snippets.enabled, code_effect) {
			let rotator = SnippetRotator::new(snippets, &config.snippets);
			let period = rotator.interval_ms();
			let code = code.clone();
			let show = move || {
				let placement = rotator.next(&mut MathRandom);
				code.set_text_content(Some(placement.text));
				let style = code.style();
				let _ = style.set_property("left", &format!("{}%", placement.left_pct));
				let _ = style.set_property("top", &format!("{}%", placement.top_pct));
				let _ = style.set_property("transform", &placement.transform_css());
			};
			show();
			effects.snippets = Some(Interval::start(period, show)?);
		}

		if config.page.enabled {
			effects.page = Some(PageObserver::attach(&config.page)?);
		}

		Ok(effects)
	}

	/// Stop every effect and remove the elements it added.
	pub fn stop(&mut self) {
		if let Some(frame_loop) = self.frame_loop.take() {
			frame_loop.stop();
		}
		self.listeners.clear();
		if let Some(scene) = self.particles.take() {
			scene.borrow_mut().layer.clear();
		}
		if let Some(stars) = self.stars.take() {
			stars.borrow_mut().stop();
		}
		self.snippets = None;
		self.page = None;
	}
}

impl Drop for SkyEffects {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Renders the particle layer and code overlay and runs the sky effects.
///
/// The containers are plain `div`s with the `particles` and `code-effect`
/// classes; the page stylesheet positions them and styles the generated
/// `.particle` and `.shooting-star` children.
#[component]
pub fn NightSky(
	/// Snippets to rotate; the built-in list when absent.
	#[prop(optional)]
	snippets: Option<SnippetList>,
	/// Tunables; the page defaults when absent.
	#[prop(optional)]
	config: Option<SkyConfig>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let code_ref = NodeRef::<leptos::html::Div>::new();
	let effects: Rc<RefCell<Option<SkyEffects>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let snippets = snippets.unwrap_or_default();

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if effects.borrow().is_some() {
			return;
		}
		let container: Element = container.into();
		let code: Option<HtmlElement> = code_ref.get().map(Into::into);

		match SkyEffects::start(&container, code.as_ref(), snippets.clone(), &config) {
			Ok(started) => {
				info!(
					"night-sky: started ({} particles, stars {})",
					config.particles.count,
					if config.stars.enabled { "on" } else { "off" }
				);
				*effects.borrow_mut() = Some(started);
			}
			Err(e) => error!("night-sky: failed to start effects: {}", e),
		}
	});

	view! {
		<div node_ref=container_ref class="particles" aria-hidden="true"></div>
		<div node_ref=code_ref class="code-effect" aria-hidden="true"></div>
	}
}
