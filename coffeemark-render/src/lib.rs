//! # CoffeeMarkdown renderer
//!
//! A single-pass markdown-to-HTML transpiler for a web publishing platform
//! (stories, microblogs, character profiles). It supports headings,
//! emphasis, nested lists with checkboxes, tables, blockquotes, code
//! blocks, links and images (with an image-proxy rewrite rule), plus a set
//! of non-standard block extensions: aligned blocks, colored and background
//! blocks, two-column layouts with recursive inner parsing, and poetry
//! blocks.
//!
//! Untrusted HTML is escaped up front, with a fixed tag allow-list passed
//! through for the extension handlers to interpret. Rendering is a fixed
//! order of regex-driven rewrite stages over a single string; compatibility
//! is with this dialect itself, not with CommonMark.
//!
//! ## Quick Start
//!
//! ```rust
//! use coffeemark_render::{Renderer, StyleOverrides};
//!
//! let renderer = Renderer::new(StyleOverrides::default());
//! let html = renderer.render("# Hello\n\nThis is **bold** text.");
//! assert!(html.contains("<h1"));
//! ```
//!
//! ## Styling
//!
//! Every emitted element carries an inline `style` attribute. Callers can
//! override any element kind's style string; unspecified kinds keep the
//! built-in defaults:
//!
//! ```rust
//! use coffeemark_render::{Renderer, StyleOverrides};
//!
//! let overrides = StyleOverrides {
//!   h1: Some("font-size:3rem;".into()),
//!   ..Default::default()
//! };
//! let html = Renderer::new(overrides).render("# Big");
//! assert!(html.contains("font-size:3rem;"));
//! ```
//!
//! Rendering is purely functional over its input: no I/O, no shared mutable
//! state. A renderer can be shared freely across threads and invoked once
//! per request with no coordination.

mod renderer;
mod styles;
pub mod utils;

pub use crate::{
  renderer::Renderer,
  styles::{StyleOverrides, Styles},
  utils::{UtilError, UtilResult, load_style_overrides},
};

/// Render markdown with the given style overrides merged over the defaults.
///
/// Convenience wrapper for one-off calls; construct a [`Renderer`] when
/// rendering repeatedly with the same configuration.
#[must_use]
pub fn render(markdown: &str, overrides: StyleOverrides) -> String {
  Renderer::new(overrides).render(markdown)
}
