//! CSS-style cubic Bézier timing curves.
//!
//! The browser evaluates the curve itself when it plays an animation, so only
//! the control points and their CSS form live here.

/// A timing curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
	/// First control point, x.
	pub x1: f64,
	/// First control point, y.
	pub y1: f64,
	/// Second control point, x.
	pub x2: f64,
	/// Second control point, y.
	pub y2: f64,
}

impl CubicBezier {
	/// The CSS `ease` curve.
	pub const EASE: Self = Self::new(0.25, 0.1, 0.25, 1.0);

	/// Curve with the given control points.
	pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
		Self { x1, y1, x2, y2 }
	}

	/// The `cubic-bezier(...)` easing string.
	pub fn to_css(self) -> String {
		format!("cubic-bezier({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
	}
}

impl Default for CubicBezier {
	fn default() -> Self {
		Self::EASE
	}
}
