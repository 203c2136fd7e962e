//! Rotating code snippet overlay.

use super::config::SnippetStyle;
use super::rng::RandomSource;
use super::types::SnippetList;

/// Where and how the next snippet is shown.
#[derive(Clone, Debug, PartialEq)]
pub struct SnippetPlacement<'a> {
	/// The snippet source.
	pub text: &'a str,
	/// Offsets from the top-left corner, in percent of the container.
	pub left_pct: f64,
	/// See `left_pct`.
	pub top_pct: f64,
	/// Tilt, in degrees.
	pub rotation_deg: f64,
}

impl SnippetPlacement<'_> {
	/// The CSS `transform` for the tilt.
	pub fn transform_css(&self) -> String {
		format!("rotate({}deg)", self.rotation_deg)
	}
}

/// Picks a random snippet and a random spot for it on every turn.
pub struct SnippetRotator {
	snippets: SnippetList,
	style: SnippetStyle,
}

impl SnippetRotator {
	/// An empty list falls back to the built-in snippets.
	pub fn new(snippets: SnippetList, style: &SnippetStyle) -> Self {
		let snippets = if snippets.0.is_empty() {
			SnippetList::default()
		} else {
			snippets
		};
		Self {
			snippets,
			style: style.clone(),
		}
	}

	/// Draw the next snippet and where to put it.
	pub fn next(&self, rng: &mut impl RandomSource) -> SnippetPlacement<'_> {
		let text = &self.snippets.0[rng.index(self.snippets.0.len())];
		let left_pct = rng.next_f64() * self.style.span_pct + self.style.margin_pct;
		let top_pct = rng.next_f64() * self.style.span_pct + self.style.margin_pct;
		let rotation_deg = rng.range(-self.style.max_tilt_deg, self.style.max_tilt_deg);
		SnippetPlacement {
			text,
			left_pct,
			top_pct,
			rotation_deg,
		}
	}

	/// Time between rotations.
	pub fn interval_ms(&self) -> f64 {
		self.style.interval_ms
	}

	/// Number of snippets to choose from.
	pub fn len(&self) -> usize {
		self.snippets.0.len()
	}

	/// Always false once constructed.
	pub fn is_empty(&self) -> bool {
		self.snippets.0.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::sky::rng::{Sequence, Xorshift};

	#[test]
	fn placement_stays_inside_margins() {
		let rotator = SnippetRotator::new(SnippetList::default(), &SnippetStyle::default());
		let mut rng = Xorshift::new(17);
		for _ in 0..500 {
			let p = rotator.next(&mut rng);
			assert!((10.0..90.0).contains(&p.left_pct));
			assert!((10.0..90.0).contains(&p.top_pct));
			assert!((-10.0..10.0).contains(&p.rotation_deg));
			assert!(!p.text.is_empty());
		}
	}

	#[test]
	fn draws_snippet_then_position_then_tilt() {
		let list = SnippetList(vec!["a".into(), "b".into()]);
		let rotator = SnippetRotator::new(list, &SnippetStyle::default());
		let mut rng = Sequence::new(&[0.75, 0.0, 0.5, 1.0 - 1e-12]);
		let p = rotator.next(&mut rng);
		assert_eq!(p.text, "b");
		assert_eq!(p.left_pct, 10.0);
		assert_eq!(p.top_pct, 50.0);
		assert!(p.rotation_deg > 9.99);
		assert!(p.transform_css().starts_with("rotate("));
	}

	#[test]
	fn empty_list_falls_back_to_defaults() {
		let rotator = SnippetRotator::new(SnippetList(Vec::new()), &SnippetStyle::default());
		assert_eq!(rotator.len(), 4);
		assert_eq!(rotator.interval_ms(), 5000.0);
	}
}
