//! Pointer tracking shared between `mousemove` events and the frame loop.

/// Latest pointer sample plus the sample the previous frame ended with.
///
/// Events may arrive any number of times between frames; the frame loop reads
/// [`PointerState::velocity`] for every particle and then calls
/// [`PointerState::end_frame`] exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// Latest position, in page px.
	pub x: f64,
	/// Latest position, in page px.
	pub y: f64,
	/// Position when the previous frame ended.
	pub last_x: f64,
	/// Position when the previous frame ended.
	pub last_y: f64,
}

impl PointerState {
	/// Record a new absolute pointer position.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
	}

	/// Pointer displacement since the end of the previous frame.
	pub fn velocity(&self) -> (f64, f64) {
		(self.x - self.last_x, self.y - self.last_y)
	}

	/// Magnitude of [`Self::velocity`].
	pub fn speed(&self) -> f64 {
		let (vx, vy) = self.velocity();
		vx.hypot(vy)
	}

	/// Make the current sample the baseline for the next frame's velocity.
	pub fn end_frame(&mut self) {
		self.last_x = self.x;
		self.last_y = self.y;
	}
}
