//! UI components.

pub mod sky;
