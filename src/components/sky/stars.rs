//! Shooting star spawning.
//!
//! [`StarScheduler`] owns the bookkeeping: which stars are in flight, when the
//! next one may spawn, and what path each one takes. Everything that touches
//! the page (timers, elements, the animation engine) sits behind
//! [`StarStage`], so the browser and the tests drive the same state machine.
//!
//! The lifecycle is:
//! 1. a spawn timer fires and the stage calls [`StarScheduler::create_star`];
//! 2. if fewer than `max_active` stars are flying, a [`StarFlight`] is built
//!    and handed to [`StarStage::launch`];
//! 3. when the animation ends the stage calls [`StarScheduler::finish_star`],
//!    which retires the element and arms the next spawn timer.
//!
//! A spawn attempt at capacity is dropped without re-arming; only finishing
//! stars keep the chain going.

use std::collections::BTreeSet;

use log::debug;

use super::config::StarStyle;
use super::easing::CubicBezier;
use super::rng::RandomSource;
use super::types::Viewport;

/// Identifies one star for the lifetime of its animation.
pub type StarId = u64;

/// One animation waypoint, in absolute page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
	/// Element opacity at this waypoint.
	pub opacity: f64,
	/// Position in px.
	pub x: f64,
	/// Position in px.
	pub y: f64,
}

/// How the keyframes are played back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarTiming {
	/// Length of the whole flight.
	pub duration_ms: f64,
	/// Timing curve across the whole flight.
	pub easing: CubicBezier,
	/// Keep the last keyframe applied after the animation ends.
	pub fill_forwards: bool,
}

impl StarTiming {
	/// The Web Animations `fill` value.
	pub fn fill_css(&self) -> &'static str {
		if self.fill_forwards { "forwards" } else { "none" }
	}
}

/// A star's straight-line path across the sky.
#[derive(Clone, Debug, PartialEq)]
pub struct StarFlight {
	/// Where the star appears.
	pub start: (f64, f64),
	/// `start` moved one viewport span along `angle`.
	pub end: (f64, f64),
	/// Direction of travel in radians, measured clockwise from +x in screen space.
	pub angle: f64,
	/// Fade in, cruise, fade out.
	pub keyframes: [Keyframe; 4],
	/// Playback parameters.
	pub timing: StarTiming,
}

impl StarFlight {
	/// Pick a random start in the top-left region and a random heading.
	pub fn random(style: &StarStyle, viewport: Viewport, rng: &mut impl RandomSource) -> Self {
		let start = (
			rng.next_f64() * viewport.width * style.spawn_region,
			rng.next_f64() * viewport.height * style.spawn_region,
		);
		let angle = rng
			.range(style.min_angle_deg, style.max_angle_deg)
			.to_radians();
		Self::new(style, viewport, start, angle)
	}

	/// Flight from `start` heading `angle` radians, long enough to leave the viewport.
	pub fn new(style: &StarStyle, viewport: Viewport, start: (f64, f64), angle: f64) -> Self {
		let distance = viewport.span();
		let end = (
			start.0 + distance * angle.cos(),
			start.1 + distance * angle.sin(),
		);
		let toward = |fraction: f64| {
			(
				start.0 + (end.0 - start.0) * fraction,
				start.1 + (end.1 - start.1) * fraction,
			)
		};
		let cruise = toward(style.cruise_fraction);
		let peak = style.peak_opacity;

		let keyframes = [
			Keyframe {
				opacity: 0.0,
				x: start.0,
				y: start.1,
			},
			Keyframe {
				opacity: peak,
				x: start.0 + style.lead_in,
				y: start.1 + style.lead_in,
			},
			Keyframe {
				opacity: peak,
				x: cruise.0,
				y: cruise.1,
			},
			Keyframe {
				opacity: 0.0,
				x: end.0,
				y: end.1,
			},
		];

		Self {
			start,
			end,
			angle,
			keyframes,
			timing: StarTiming {
				duration_ms: style.duration_ms,
				easing: CubicBezier::EASE,
				fill_forwards: true,
			},
		}
	}

	/// Each keyframe as `(opacity, dx, dy)`, the translation relative to `start`.
	///
	/// The star's element sits at `start`, so these are the values it is
	/// transformed by.
	pub fn offsets(&self) -> [(f64, f64, f64); 4] {
		self.keyframes
			.map(|k| (k.opacity, k.x - self.start.0, k.y - self.start.1))
	}
}

/// The page-side capabilities the scheduler needs.
pub trait StarStage {
	/// Current viewport size.
	fn viewport(&self) -> Viewport;

	/// Arrange for [`StarScheduler::create_star`] to be called after `delay_ms`.
	fn arm_spawn(&mut self, delay_ms: f64);

	/// Show the star and play its flight. When playback completes the stage
	/// must call [`StarScheduler::finish_star`] with the same id.
	fn launch(&mut self, id: StarId, flight: &StarFlight);

	/// Remove the star's element from the page.
	fn retire(&mut self, id: StarId);
}

/// Spawns shooting stars at random intervals, never more than `max_active` at once.
pub struct StarScheduler<R> {
	style: StarStyle,
	rng: R,
	active: BTreeSet<StarId>,
	next_id: StarId,
	stopped: bool,
	log_enabled: bool,
}

impl<R: RandomSource> StarScheduler<R> {
	/// Idle scheduler; nothing is armed until [`start`](Self::start).
	pub fn new(style: &StarStyle, rng: R) -> Self {
		Self {
			style: style.clone(),
			rng,
			active: BTreeSet::new(),
			next_id: 0,
			stopped: false,
			log_enabled: false,
		}
	}

	/// Emit lifecycle messages on the `stars` log target.
	pub fn with_logging(mut self, enabled: bool) -> Self {
		self.log_enabled = enabled;
		self
	}

	/// Arm the startup spawn timers.
	pub fn start(&mut self, stage: &mut impl StarStage) {
		if self.stopped {
			return;
		}
		for &delay in &self.style.initial_delays_ms {
			stage.arm_spawn(delay);
		}
	}

	/// Launch a new star unless the sky is already at capacity.
	///
	/// At capacity this does nothing at all, including re-arming; the next
	/// spawn is armed when one of the flying stars finishes.
	pub fn create_star(&mut self, stage: &mut impl StarStage) -> Option<StarId> {
		if self.stopped || self.active.len() >= self.style.max_active {
			return None;
		}

		let flight = StarFlight::random(&self.style, stage.viewport(), &mut self.rng);
		let id = self.next_id;
		self.next_id += 1;

		self.active.insert(id);
		stage.launch(id, &flight);

		if self.log_enabled {
			debug!(
				target: "stars",
				"[STARS] new shooting star #{} from ({:.0}, {:.0}) at {:.1}°",
				id,
				flight.start.0,
				flight.start.1,
				flight.angle.to_degrees()
			);
		}
		Some(id)
	}

	/// Arm a spawn timer with a uniform delay in `[min_interval_ms, max_interval_ms]`.
	pub fn schedule_next(&mut self, stage: &mut impl StarStage) -> Option<f64> {
		if self.stopped {
			return None;
		}
		let delay = self
			.rng
			.range(self.style.min_interval_ms, self.style.max_interval_ms);
		stage.arm_spawn(delay);

		if self.log_enabled {
			debug!(
				target: "stars",
				"[STARS] next star scheduled in: {} seconds",
				(delay / 1000.0).round()
			);
		}
		Some(delay)
	}

	/// Called by the stage when a star's animation has completed.
	pub fn finish_star(&mut self, id: StarId, stage: &mut impl StarStage) {
		if !self.active.remove(&id) {
			return;
		}
		stage.retire(id);
		self.schedule_next(stage);
	}

	/// Stop spawning. Returns the stars still in flight so the stage can clear them.
	pub fn stop(&mut self) -> Vec<StarId> {
		self.stopped = true;
		std::mem::take(&mut self.active).into_iter().collect()
	}

	/// Stars currently in flight.
	pub fn active_count(&self) -> usize {
		self.active.len()
	}

	/// Whether `id` is still in flight.
	pub fn is_active(&self, id: StarId) -> bool {
		self.active.contains(&id)
	}

	/// Whether [`stop`](Self::stop) has been called.
	pub fn is_stopped(&self) -> bool {
		self.stopped
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sky::rng::{Sequence, Xorshift};

	const EPS: f64 = 1e-9;

	/// Records stage calls and keeps a virtual clock of pending spawns and landings.
	#[derive(Default)]
	struct FakeStage {
		viewport: Option<Viewport>,
		now: f64,
		spawns: Vec<f64>,
		landings: Vec<(f64, StarId)>,
		launched: Vec<(StarId, StarFlight)>,
		retired: Vec<StarId>,
		armed_delays: Vec<f64>,
	}

	impl StarStage for FakeStage {
		fn viewport(&self) -> Viewport {
			self.viewport.unwrap_or(Viewport::new(1000.0, 800.0))
		}

		fn arm_spawn(&mut self, delay_ms: f64) {
			self.armed_delays.push(delay_ms);
			self.spawns.push(self.now + delay_ms);
		}

		fn launch(&mut self, id: StarId, flight: &StarFlight) {
			self.landings.push((self.now + flight.timing.duration_ms, id));
			self.launched.push((id, flight.clone()));
		}

		fn retire(&mut self, id: StarId) {
			self.retired.push(id);
		}
	}

	enum Due {
		Spawn(usize),
		Landing(usize),
	}

	impl FakeStage {
		/// Fire the earliest pending event. Returns false when nothing is pending.
		fn step<R: RandomSource>(&mut self, scheduler: &mut StarScheduler<R>) -> bool {
			let spawn = self
				.spawns
				.iter()
				.enumerate()
				.min_by(|a, b| a.1.total_cmp(b.1))
				.map(|(i, &t)| (t, Due::Spawn(i)));
			let landing = self
				.landings
				.iter()
				.enumerate()
				.min_by(|a, b| a.1.0.total_cmp(&b.1.0))
				.map(|(i, &(t, _))| (t, Due::Landing(i)));
			let next = match (spawn, landing) {
				(Some(s), Some(l)) => Some(if s.0 <= l.0 { s } else { l }),
				(s, l) => s.or(l),
			};
			let Some((at, due)) = next else {
				return false;
			};
			self.now = at;
			match due {
				Due::Spawn(i) => {
					self.spawns.remove(i);
					scheduler.create_star(self);
				}
				Due::Landing(i) => {
					let (_, id) = self.landings.remove(i);
					scheduler.finish_star(id, self);
				}
			}
			true
		}

		fn run_until<R: RandomSource>(&mut self, scheduler: &mut StarScheduler<R>, until: f64) {
			while self.next_due().is_some_and(|t| t <= until) {
				self.step(scheduler);
				assert!(scheduler.active_count() <= 2);
			}
		}

		fn next_due(&self) -> Option<f64> {
			self.spawns
				.iter()
				.copied()
				.chain(self.landings.iter().map(|l| l.0))
				.min_by(|a, b| a.total_cmp(b))
		}
	}

	#[test]
	fn end_point_projects_longest_side_along_angle() {
		let style = StarStyle::default();
		let viewport = Viewport::new(1200.0, 700.0);
		let mut rng = Xorshift::new(5);
		for _ in 0..200 {
			let f = StarFlight::random(&style, viewport, &mut rng);
			assert!(f.angle >= 30f64.to_radians() && f.angle < 45f64.to_radians());
			assert!(f.start.0 >= 0.0 && f.start.0 < 1200.0 * 0.3);
			assert!(f.start.1 >= 0.0 && f.start.1 < 700.0 * 0.3);
			assert!((f.end.0 - (f.start.0 + 1200.0 * f.angle.cos())).abs() < EPS);
			assert!((f.end.1 - (f.start.1 + 1200.0 * f.angle.sin())).abs() < EPS);
		}
	}

	#[test]
	fn keyframes_fade_in_cruise_and_fade_out() {
		let style = StarStyle::default();
		let f = StarFlight::new(&style, Viewport::new(800.0, 1000.0), (100.0, 50.0), 0.0);
		assert_eq!(f.end, (1100.0, 50.0));

		let opacities: Vec<f64> = f.keyframes.iter().map(|k| k.opacity).collect();
		assert_eq!(opacities, vec![0.0, 0.3, 0.3, 0.0]);

		assert_eq!((f.keyframes[0].x, f.keyframes[0].y), (100.0, 50.0));
		assert_eq!((f.keyframes[1].x, f.keyframes[1].y), (120.0, 70.0));
		assert!((f.keyframes[2].x - 700.0).abs() < EPS);
		assert_eq!((f.keyframes[3].x, f.keyframes[3].y), f.end);

		assert_eq!(f.timing.duration_ms, 2000.0);
		assert_eq!(f.timing.easing, CubicBezier::EASE);
		assert!(f.timing.fill_forwards);
	}

	#[test]
	fn offsets_translate_from_start_to_end() {
		let f = StarFlight::new(&StarStyle::default(), Viewport::new(800.0, 600.0), (40.0, 30.0), 0.5);
		let offsets = f.offsets();
		assert_eq!(offsets[0], (0.0, 0.0, 0.0));
		assert_eq!(offsets[1], (0.3, 20.0, 20.0));
		assert!((offsets[2].1 - 0.6 * 800.0 * 0.5f64.cos()).abs() < 1e-6);
		let (opacity, dx, dy) = offsets[3];
		assert_eq!(opacity, 0.0);
		assert!((dx - 800.0 * 0.5f64.cos()).abs() < 1e-6);
		assert!((dy - 800.0 * 0.5f64.sin()).abs() < 1e-6);
	}

	#[test]
	fn timing_maps_to_web_animation_options() {
		let f = StarFlight::new(&StarStyle::default(), Viewport::new(800.0, 600.0), (0.0, 0.0), 0.6);
		assert_eq!(f.timing.easing.to_css(), "cubic-bezier(0.25, 0.1, 0.25, 1)");
		assert_eq!(f.timing.fill_css(), "forwards");

		let held = StarTiming {
			fill_forwards: false,
			..f.timing
		};
		assert_eq!(held.fill_css(), "none");
	}

	#[test]
	fn third_concurrent_star_is_dropped() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Xorshift::new(1));
		let mut stage = FakeStage::default();

		assert_eq!(scheduler.create_star(&mut stage), Some(0));
		assert_eq!(scheduler.create_star(&mut stage), Some(1));
		assert_eq!(scheduler.create_star(&mut stage), None);

		assert_eq!(scheduler.active_count(), 2);
		assert_eq!(stage.launched.len(), 2);
		// Dropping the spawn does not arm a replacement.
		assert!(stage.armed_delays.is_empty());
	}

	#[test]
	fn finishing_a_star_retires_it_and_rearms() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Sequence::new(&[0.5]));
		let mut stage = FakeStage::default();

		let id = scheduler.create_star(&mut stage).unwrap();
		scheduler.finish_star(id, &mut stage);

		assert_eq!(scheduler.active_count(), 0);
		assert!(!scheduler.is_active(id));
		assert_eq!(stage.retired, vec![id]);
		assert_eq!(stage.armed_delays, vec![5500.0]);

		// A second completion for the same star is ignored.
		scheduler.finish_star(id, &mut stage);
		assert_eq!(stage.retired.len(), 1);
		assert_eq!(stage.armed_delays.len(), 1);
	}

	#[test]
	fn delays_stay_within_interval_bounds() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Xorshift::new(11));
		let mut stage = FakeStage::default();
		for _ in 0..1_000 {
			let d = scheduler.schedule_next(&mut stage).unwrap();
			assert!((3000.0..=8000.0).contains(&d));
		}

		let mut edges = StarScheduler::new(&StarStyle::default(), Sequence::new(&[0.0, 0.999_999]));
		assert_eq!(edges.schedule_next(&mut stage), Some(3000.0));
		assert!(edges.schedule_next(&mut stage).unwrap() <= 8000.0);
	}

	#[test]
	fn start_arms_initial_timers() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Xorshift::new(2));
		let mut stage = FakeStage::default();
		scheduler.start(&mut stage);
		assert_eq!(stage.armed_delays, vec![3000.0, 2000.0]);
	}

	#[test]
	fn long_run_never_exceeds_cap() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Xorshift::new(1234));
		let mut stage = FakeStage::default();
		scheduler.start(&mut stage);

		stage.run_until(&mut scheduler, 10.0 * 60_000.0);

		// Stars keep flowing for the whole run.
		assert!(stage.launched.len() > 100);
		assert_eq!(stage.retired.len() + scheduler.active_count(), stage.launched.len());
	}

	#[test]
	fn saturated_sky_recovers_through_completions() {
		let style = StarStyle {
			initial_delays_ms: vec![0.0, 0.0, 0.0],
			..StarStyle::default()
		};
		let mut scheduler = StarScheduler::new(&style, Xorshift::new(8));
		let mut stage = FakeStage::default();
		scheduler.start(&mut stage);

		// Three simultaneous spawns: two fly, one is dropped.
		for _ in 0..3 {
			stage.step(&mut scheduler);
		}
		assert_eq!(scheduler.active_count(), 2);
		assert!(stage.spawns.is_empty());

		// Each landing re-arms exactly one spawn.
		stage.step(&mut scheduler);
		stage.step(&mut scheduler);
		assert_eq!(scheduler.active_count(), 0);
		assert_eq!(stage.spawns.len(), 2);
	}

	#[test]
	fn stop_halts_spawning_and_rearming() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Xorshift::new(4));
		let mut stage = FakeStage::default();
		let a = scheduler.create_star(&mut stage).unwrap();

		let in_flight = scheduler.stop();
		assert_eq!(in_flight, vec![a]);
		assert!(scheduler.is_stopped());
		assert_eq!(scheduler.active_count(), 0);

		assert_eq!(scheduler.create_star(&mut stage), None);
		assert_eq!(scheduler.schedule_next(&mut stage), None);
		scheduler.finish_star(a, &mut stage);
		assert!(stage.armed_delays.is_empty());
		assert!(stage.retired.is_empty());
	}

	#[test]
	fn uses_current_viewport_for_each_star() {
		let mut scheduler = StarScheduler::new(&StarStyle::default(), Sequence::new(&[0.0]));
		let mut stage = FakeStage {
			viewport: Some(Viewport::new(400.0, 900.0)),
			..FakeStage::default()
		};
		scheduler.create_star(&mut stage);
		let (_, flight) = &stage.launched[0];
		assert_eq!(flight.start, (0.0, 0.0));
		assert!((flight.end.0 - 900.0 * 30f64.to_radians().cos()).abs() < EPS);
	}
}
