//! Ambient effects for a personal landing page.
//!
//! Two independent simulations run behind the page content:
//! - a field of floating particles that drift upward, wrap at the screen
//!   edges, and get pushed along by fast pointer motion;
//! - shooting stars that streak from the top-left corner at random
//!   intervals, at most two at a time.
//!
//! Alongside them, a code snippet overlay rotates every few seconds, content
//! fades in as it scrolls into view, and the URL fragment follows the visible
//! section.
//!
//! The physics and scheduling (`particles`, `pointer`, `stars`, `snippets`,
//! `monitor`) are plain Rust with injectable randomness; `web`, `tasks`,
//! `page` and `component` bind them to the browser.
//!
//! # Example
//!
//! ```ignore
//! use night_sky::{NightSky, SkyConfig};
//!
//! let mut config = SkyConfig::default();
//! config.debug.stars = false;
//!
//! view! { <NightSky config=config /> }
//! ```

mod component;
pub mod config;
pub mod easing;
mod error;
pub mod monitor;
mod page;
pub mod particles;
pub mod pointer;
pub mod rng;
pub mod snippets;
pub mod stars;
mod tasks;
mod types;
mod web;

pub use component::{NightSky, SkyEffects};
pub use config::SkyConfig;
pub use error::HostError;
pub use page::{hash_update, initial_hash};
pub use tasks::{AnimationLoop, EventListener, Interval, Timers};
pub use types::{SnippetList, Viewport};
pub use web::MathRandom;
