//! Frame rate sampling for the `particles` debug category.

/// Counts frames and reports the rate once per sampling window.
#[derive(Clone, Debug)]
pub struct FrameMonitor {
	window_ms: f64,
	window_start: Option<f64>,
	frames: u32,
}

impl FrameMonitor {
	/// Report once every `window_ms`.
	pub fn new(window_ms: f64) -> Self {
		Self {
			window_ms,
			window_start: None,
			frames: 0,
		}
	}

	/// Count a frame at `now_ms`. Returns the frame count of the window that
	/// just closed, if at least `window_ms` has passed since it opened.
	pub fn frame(&mut self, now_ms: f64) -> Option<u32> {
		let start = *self.window_start.get_or_insert(now_ms);
		self.frames += 1;
		if now_ms - start >= self.window_ms {
			let frames = self.frames;
			self.frames = 0;
			self.window_start = Some(now_ms);
			Some(frames)
		} else {
			None
		}
	}
}

impl Default for FrameMonitor {
	fn default() -> Self {
		Self::new(1000.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reports_once_per_second() {
		let mut monitor = FrameMonitor::default();
		let mut reports = Vec::new();
		// 60 Hz for a little over two seconds.
		for i in 0..=130 {
			if let Some(fps) = monitor.frame(i as f64 * 1000.0 / 60.0) {
				reports.push(fps);
			}
		}
		assert_eq!(reports, vec![61, 60]);
	}

	#[test]
	fn quiet_inside_window() {
		let mut monitor = FrameMonitor::new(1000.0);
		assert_eq!(monitor.frame(0.0), None);
		assert_eq!(monitor.frame(999.0), None);
		assert_eq!(monitor.frame(1000.0), Some(3));
	}
}
