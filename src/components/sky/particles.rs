//! Floating background particles nudged by pointer motion.

use super::config::{ParticleStyle, PointerStyle};
use super::pointer::PointerState;
use super::rng::RandomSource;
use super::types::Viewport;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Position in px.
	pub x: f64,
	/// Position in px.
	pub y: f64,
	/// Velocity in px per frame.
	pub vx: f64,
	/// Velocity in px per frame; negative is up.
	pub vy: f64,
	/// Diameter in px.
	pub size: f64,
	/// Base opacity.
	pub opacity: f64,
	/// CSS twinkle animation duration, in seconds.
	pub twinkle_secs: f64,
	/// CSS twinkle animation delay, in seconds.
	pub twinkle_delay_secs: f64,
}

impl Particle {
	fn spawn(style: &ParticleStyle, viewport: Viewport, rng: &mut impl RandomSource) -> Self {
		let size = rng.range(style.size_min, style.size_max);
		let x = rng.next_f64() * viewport.width;
		let y = rng.next_f64() * viewport.height;
		let vy = -style.rise_min - rng.next_f64() * style.rise_spread;
		let twinkle_secs = rng.range(style.twinkle_min_secs, style.twinkle_max_secs);
		let twinkle_delay_secs = rng.next_f64() * style.twinkle_delay_secs;
		let opacity = rng.range(style.opacity_min, style.opacity_max);

		Self {
			x,
			y,
			vx: 0.0,
			vy,
			size,
			opacity,
			twinkle_secs,
			twinkle_delay_secs,
		}
	}

	/// Advance one frame. Pointer velocity is applied only inside the influence radius.
	fn step(
		&mut self,
		pointer: &PointerState,
		style: &ParticleStyle,
		influence: &PointerStyle,
		viewport: Viewport,
	) {
		let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
		let distance = dx.hypot(dy);

		if distance < influence.influence_radius {
			let (pvx, pvy) = pointer.velocity();
			let force = (1.0 - distance / influence.influence_radius) * influence.force;
			self.vx += pvx * force;
			self.vy += pvy * force;
		}

		self.x += self.vx;
		self.y += self.vy;

		self.vx *= style.damping;
		self.vy *= style.damping;
		self.vy += style.drift;

		let m = style.wrap_margin;
		if self.x < -m {
			self.x = viewport.width + m;
		}
		if self.x > viewport.width + m {
			self.x = -m;
		}
		if self.y < -m {
			self.y = viewport.height + m;
		}
		if self.y > viewport.height + m {
			self.y = -m;
		}
	}
}

/// Fixed population of particles covering the viewport.
pub struct ParticleField {
	/// The population, in spawn order.
	pub particles: Vec<Particle>,
	style: ParticleStyle,
	influence: PointerStyle,
	viewport: Viewport,
}

impl ParticleField {
	/// Spawn `style.count` particles scattered over `viewport`.
	pub fn new(
		style: &ParticleStyle,
		influence: &PointerStyle,
		viewport: Viewport,
		rng: &mut impl RandomSource,
	) -> Self {
		let particles = (0..style.count)
			.map(|_| Particle::spawn(style, viewport, &mut *rng))
			.collect();

		Self {
			particles,
			style: style.clone(),
			influence: influence.clone(),
			viewport,
		}
	}

	/// Advance every particle one frame, handing each to `place` once it has moved.
	///
	/// The pointer's previous position is rolled forward after the whole
	/// population has seen the same pointer velocity.
	pub fn tick(&mut self, pointer: &mut PointerState, mut place: impl FnMut(usize, &Particle)) {
		for (i, p) in self.particles.iter_mut().enumerate() {
			p.step(pointer, &self.style, &self.influence, self.viewport);
			place(i, p);
		}
		pointer.end_frame();
	}

	/// Wrap against new bounds from now on. Positions are left where they are.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	/// Current wrap bounds.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the field has no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}
