//! Injectable randomness.
//!
//! Every random draw in the sky effects goes through [`RandomSource`], so the
//! browser can use `Math.random()` while tests replay fixed values.

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
	/// Next sample in `[0, 1)`.
	fn next_f64(&mut self) -> f64;

	/// Uniform sample in `[min, max)`.
	fn range(&mut self, min: f64, max: f64) -> f64 {
		min + self.next_f64() * (max - min)
	}

	/// Uniform index in `[0, len)`. `len` must be non-zero.
	fn index(&mut self, len: usize) -> usize {
		((self.next_f64() * len as f64) as usize).min(len - 1)
	}
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
	fn next_f64(&mut self) -> f64 {
		(**self).next_f64()
	}
}

/// Seedable xorshift64 generator. Deterministic across platforms.
#[derive(Clone, Debug)]
pub struct Xorshift {
	state: u64,
}

impl Xorshift {
	/// Seeded generator. A zero seed is replaced with 1.
	pub fn new(seed: u64) -> Self {
		Self {
			state: if seed == 0 { 1 } else { seed },
		}
	}

	fn next_u64(&mut self) -> u64 {
		let mut x = self.state;
		x ^= x << 13;
		x ^= x >> 7;
		x ^= x << 17;
		self.state = x;
		x
	}
}

impl RandomSource for Xorshift {
	fn next_f64(&mut self) -> f64 {
		// Top 53 bits fill the f64 mantissa exactly.
		(self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
	}
}

/// Replays a fixed list of samples, cycling when exhausted.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct Sequence {
	values: Vec<f64>,
	cursor: usize,
}

#[cfg(test)]
impl Sequence {
	pub(crate) fn new(values: &[f64]) -> Self {
		assert!(!values.is_empty());
		Self {
			values: values.to_vec(),
			cursor: 0,
		}
	}
}

#[cfg(test)]
impl RandomSource for Sequence {
	fn next_f64(&mut self) -> f64 {
		let value = self.values[self.cursor % self.values.len()];
		self.cursor += 1;
		value
	}
}
