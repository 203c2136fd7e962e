//! Tunables for the sky effects.
//!
//! Everything here is a compile-time default; the nested style structs mirror
//! how each subsystem consumes them.

/// Floating particle population and physics constants.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Run the particle field at all.
	pub enabled: bool,
	/// Number of particles created at startup.
	pub count: usize,
	/// Multiplier applied to velocity every step.
	pub damping: f64,
	/// Added to `vy` every step after damping.
	pub drift: f64,
	/// Margin beyond the viewport before a particle wraps to the other side.
	pub wrap_margin: f64,
	/// Smallest diameter, in px.
	pub size_min: f64,
	/// Largest diameter, in px.
	pub size_max: f64,
	/// Lowest base opacity.
	pub opacity_min: f64,
	/// Highest base opacity.
	pub opacity_max: f64,
	/// CSS twinkle animation duration range, in seconds.
	pub twinkle_min_secs: f64,
	/// Upper end of the twinkle duration range.
	pub twinkle_max_secs: f64,
	/// Upper bound of the random CSS animation delay, in seconds.
	pub twinkle_delay_secs: f64,
	/// Initial upward speed is `rise_min + r * rise_spread`.
	pub rise_min: f64,
	/// Random part of the initial upward speed.
	pub rise_spread: f64,
}

impl Default for ParticleStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			count: 100,
			damping: 0.95,
			drift: 0.01,
			wrap_margin: 10.0,
			size_min: 1.0,
			size_max: 4.0,
			opacity_min: 0.1,
			opacity_max: 0.6,
			twinkle_min_secs: 10.0,
			twinkle_max_secs: 25.0,
			twinkle_delay_secs: 2.0,
			rise_min: 0.5,
			rise_spread: 1.0,
		}
	}
}

/// How pointer motion perturbs nearby particles.
#[derive(Clone, Debug)]
pub struct PointerStyle {
	/// Distance (px) inside which the pointer affects a particle.
	pub influence_radius: f64,
	/// Force at zero distance; falls off linearly to 0 at the radius.
	pub force: f64,
}

impl Default for PointerStyle {
	fn default() -> Self {
		Self {
			influence_radius: 100.0,
			force: 0.5,
		}
	}
}

/// Shooting star spawning and flight.
#[derive(Clone, Debug)]
pub struct StarStyle {
	/// Run the shooting star scheduler at all.
	pub enabled: bool,
	/// Hard cap on simultaneously active stars.
	pub max_active: usize,
	/// Shortest delay between a star finishing and the next spawn.
	pub min_interval_ms: f64,
	/// Longest delay between a star finishing and the next spawn.
	pub max_interval_ms: f64,
	/// Spawn timers armed at startup.
	pub initial_delays_ms: Vec<f64>,
	/// Fraction of the viewport (from the top-left corner) where stars start.
	pub spawn_region: f64,
	/// Shallowest heading, clockwise from +x.
	pub min_angle_deg: f64,
	/// Steepest heading, clockwise from +x.
	pub max_angle_deg: f64,
	/// Length of one flight.
	pub duration_ms: f64,
	/// Peak opacity held through the middle keyframes.
	pub peak_opacity: f64,
	/// Offset of the second keyframe, in px on both axes.
	pub lead_in: f64,
	/// Fraction of the trajectory covered by the third keyframe.
	pub cruise_fraction: f64,
}

impl Default for StarStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			max_active: 2,
			min_interval_ms: 3000.0,
			max_interval_ms: 8000.0,
			initial_delays_ms: vec![3000.0, 2000.0],
			spawn_region: 0.3,
			min_angle_deg: 30.0,
			max_angle_deg: 45.0,
			duration_ms: 2000.0,
			peak_opacity: 0.3,
			lead_in: 20.0,
			cruise_fraction: 0.6,
		}
	}
}

/// Rotating code snippet overlay.
#[derive(Clone, Debug)]
pub struct SnippetStyle {
	/// Rotate snippets at all.
	pub enabled: bool,
	/// Time between snippet changes.
	pub interval_ms: f64,
	/// Snippets are placed within `[margin, margin + span]` percent on each axis.
	pub margin_pct: f64,
	/// Width of the placement band, in percent.
	pub span_pct: f64,
	/// Rotation is drawn from `[-max_tilt_deg, max_tilt_deg)`.
	pub max_tilt_deg: f64,
}

impl Default for SnippetStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			interval_ms: 5000.0,
			margin_pct: 10.0,
			span_pct: 80.0,
			max_tilt_deg: 10.0,
		}
	}
}

/// Scroll reveal and URL hash tracking.
#[derive(Clone, Debug)]
pub struct PageStyle {
	/// Attach reveal, hash and scroll behaviour.
	pub enabled: bool,
	/// Visible fraction at which an element counts as revealed.
	pub reveal_threshold: f64,
	/// Selector for elements that fade in on reveal.
	pub reveal_selector: &'static str,
	/// Initial downward offset of hidden elements, in px.
	pub reveal_offset: f64,
	/// CSS `transition` applied to revealable elements.
	pub reveal_transition: &'static str,
	/// Elements that scroll to the next section when clicked.
	pub scroll_indicator_selector: &'static str,
}

impl Default for PageStyle {
	fn default() -> Self {
		Self {
			enabled: true,
			reveal_threshold: 0.6,
			reveal_selector: "h2, p, .social-links",
			reveal_offset: 30.0,
			reveal_transition: "opacity 0.8s ease, transform 0.8s ease",
			scroll_indicator_selector: ".scroll-indicator",
		}
	}
}

/// Category-gated diagnostics. Each flag enables the `log` target of the same name.
#[derive(Clone, Copy, Debug)]
pub struct DebugFlags {
	/// Frame rate on the `particles` target.
	pub particles: bool,
	/// Pointer samples on the `mouse` target.
	pub mouse: bool,
	/// Spawn and scheduling on the `stars` target.
	pub stars: bool,
}

impl Default for DebugFlags {
	fn default() -> Self {
		Self {
			particles: false,
			mouse: false,
			stars: true,
		}
	}
}

/// Complete configuration for the sky effects.
#[derive(Clone, Debug, Default)]
pub struct SkyConfig {
	/// Particle field.
	pub particles: ParticleStyle,
	/// Pointer influence on particles.
	pub pointer: PointerStyle,
	/// Shooting stars.
	pub stars: StarStyle,
	/// Code snippet rotation.
	pub snippets: SnippetStyle,
	/// Reveal and hash tracking.
	pub page: PageStyle,
	/// Log categories.
	pub debug: DebugFlags,
}
