//! Scroll reveal, URL hash tracking, and scroll indicators for the host page.

use js_sys::Array;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
};

use super::config::PageStyle;
use super::error::{HostError, JsResultExt};
use super::tasks::{EventListener, window};
use super::web::document;

/// The fragment to switch to when `section_id` comes into view, if it differs
/// from `current_hash`. Sections without an id never change the hash.
pub fn hash_update(current_hash: &str, section_id: &str) -> Option<String> {
	if section_id.is_empty() {
		return None;
	}
	let wanted = format!("#{section_id}");
	(current_hash != wanted).then_some(wanted)
}

/// The fragment to set on load: the first section's, but only if the URL has none.
pub fn initial_hash(current_hash: &str, first_section_id: Option<&str>) -> Option<String> {
	if !current_hash.is_empty() && current_hash != "#" {
		return None;
	}
	first_section_id
		.filter(|id| !id.is_empty())
		.map(|id| format!("#{id}"))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, HostError> {
	let list = document
		.query_selector_all(selector)
		.context("querySelectorAll")?;
	Ok((0..list.length())
		.filter_map(|i| list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect())
}

fn replace_hash(hash: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Ok(history) = window.history() {
		let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(hash));
	}
}

fn current_hash() -> String {
	web_sys::window()
		.and_then(|w| w.location().hash().ok())
		.unwrap_or_default()
}

fn reveal(target: &Element) {
	if let Some(el) = target.dyn_ref::<HtmlElement>() {
		let style = el.style();
		let _ = style.set_property("opacity", "1");
		let _ = style.set_property("transform", "translateY(0)");
	}
}

fn sync_hash(target: &Element) {
	let Ok(Some(section)) = target.closest("section") else {
		return;
	};
	if let Some(hash) = hash_update(&current_hash(), &section.id()) {
		debug!("night-sky: section {} in view", hash);
		replace_hash(&hash);
	}
}

fn scroll_past(indicator: &Element) {
	let Ok(Some(section)) = indicator.closest("section") else {
		return;
	};
	if let Some(next) = section.next_element_sibling() {
		let options = ScrollIntoViewOptions::new();
		options.set_behavior(ScrollBehavior::Smooth);
		next.scroll_into_view_with_scroll_into_view_options(&options);
	}
}

/// Watches sections and content blocks while the page is scrolled.
///
/// Disconnects the observer and removes click handlers on drop.
pub struct PageObserver {
	observer: IntersectionObserver,
	_on_intersect: Closure<dyn FnMut(Array, IntersectionObserver)>,
	_indicators: Vec<EventListener>,
}

impl PageObserver {
	/// Hide revealable elements, start observing them and wire the scroll indicators.
	pub fn attach(style: &PageStyle) -> Result<Self, HostError> {
		let window = window()?;
		let document = document(&window)?;

		let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
			|entries: Array, _observer: IntersectionObserver| {
				for entry in entries.iter() {
					let entry: IntersectionObserverEntry = entry.unchecked_into();
					if !entry.is_intersecting() {
						continue;
					}
					let target = entry.target();
					reveal(&target);
					sync_hash(&target);
				}
			},
		);

		let init = IntersectionObserverInit::new();
		init.set_threshold(&style.reveal_threshold.into());
		let observer =
			IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)
				.context("IntersectionObserver")?;

		let sections = query_all(&document, "section")?;
		for section in &sections {
			observer.observe(section);
		}

		let hidden = format!("translateY({}px)", style.reveal_offset);
		for el in query_all(&document, style.reveal_selector)? {
			if let Some(html) = el.dyn_ref::<HtmlElement>() {
				let css = html.style();
				let _ = css.set_property("opacity", "0");
				let _ = css.set_property("transform", &hidden);
				let _ = css.set_property("transition", style.reveal_transition);
			}
			observer.observe(&el);
		}

		let first_id = sections.first().map(|s| s.id());
		if let Some(hash) = initial_hash(&current_hash(), first_id.as_deref()) {
			replace_hash(&hash);
		}

		let mut indicators = Vec::new();
		for indicator in query_all(&document, style.scroll_indicator_selector)? {
			let target = indicator.clone();
			indicators.push(EventListener::new(&indicator, "click", move |_| {
				scroll_past(&target)
			})?);
		}

		Ok(Self {
			observer,
			_on_intersect: on_intersect,
			_indicators: indicators,
		})
	}
}

impl Drop for PageObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_changes_only_for_a_new_section() {
		assert_eq!(hash_update("#about", "projects"), Some("#projects".into()));
		assert_eq!(hash_update("#about", "about"), None);
		assert_eq!(hash_update("", "about"), Some("#about".into()));
		assert_eq!(hash_update("#about", ""), None);
	}

	#[test]
	fn initial_hash_respects_existing_fragment() {
		assert_eq!(initial_hash("", Some("home")), Some("#home".into()));
		assert_eq!(initial_hash("#contact", Some("home")), None);
		assert_eq!(initial_hash("", None), None);
		assert_eq!(initial_hash("", Some("")), None);
	}
}
