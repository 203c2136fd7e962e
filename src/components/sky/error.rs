//! Failures while wiring the effects into the page.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// The browser did not provide something the effects need.
#[derive(Debug, Error)]
pub enum HostError {
	/// No global `window`, e.g. outside a browser.
	#[error("browser window is unavailable")]
	NoWindow,
	/// The window has no `document`.
	#[error("document is unavailable")]
	NoDocument,
	/// A DOM or JS call threw.
	#[error("{context} failed: {message}")]
	Js {
		/// The call that failed.
		context: &'static str,
		/// The thrown value, stringified.
		message: String,
	},
}

impl HostError {
	/// Wrap a thrown JS value.
	pub fn js(context: &'static str, err: JsValue) -> Self {
		let message = err
			.as_string()
			.unwrap_or_else(|| format!("{err:?}"));
		Self::Js { context, message }
	}
}

/// Attach a call-site label to a rejected JS call.
pub trait JsResultExt<T> {
	/// Map the error into [`HostError::Js`] labelled with `context`.
	fn context(self, context: &'static str) -> Result<T, HostError>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
	fn context(self, context: &'static str) -> Result<T, HostError> {
		self.map_err(|err| HostError::js(context, err))
	}
}
