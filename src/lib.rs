//! night-sky: ambient background effects for a static personal page.
//!
//! This crate provides a WASM-based Leptos component that fills the page
//! background with pointer-reactive floating particles and occasional
//! shooting stars, rotates a decorative code snippet, and keeps the URL
//! fragment in sync with the section being read.

use leptos::prelude::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::sky::{HostError, NightSky, SkyConfig, SkyEffects, SnippetList};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("night-sky: logging initialized");
}

/// Load snippet overrides from a script element with id="code-snippets".
/// Expected format: a JSON array of strings.
fn load_snippets() -> Option<SnippetList> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("code-snippets")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SnippetList>(&json_text) {
		Ok(list) => {
			info!("night-sky: loaded {} code snippets", list.0.len());
			Some(list)
		}
		Err(e) => {
			warn!("night-sky: failed to parse code snippets: {}", e);
			None
		}
	}
}

/// Main application component.
/// Picks up snippet overrides from the DOM and mounts the sky effects.
#[component]
pub fn App() -> impl IntoView {
	let snippets = load_snippets().unwrap_or_default();

	view! { <NightSky snippets=snippets /> }
}
