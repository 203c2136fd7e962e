//! Shared value types.

use serde::Deserialize;

/// Visible area of the page, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// `innerWidth`.
	pub width: f64,
	/// `innerHeight`.
	pub height: f64,
}

impl Viewport {
	/// A `width` x `height` viewport.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// The longer side; a star travelling this far always leaves the screen.
	pub fn span(&self) -> f64 {
		self.width.max(self.height)
	}
}

/// Code snippets shown by the rotating overlay.
///
/// Deserialized from a plain JSON array of strings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SnippetList(pub Vec<String>);

impl Default for SnippetList {
	fn default() -> Self {
		Self(
			[
				"const createAwesome = () => {\n  return \"Something Amazing\";\n}",
				"class Innovation {\n  constructor() {\n    this.ideas = [];\n  }\n}",
				"function solveProblems() {\n  return elegantSolution;\n}",
				"let passion = \"coding\";\nwhile(passion === \"coding\") {\n  create();\n}",
			]
			.into_iter()
			.map(String::from)
			.collect(),
		)
	}
}
