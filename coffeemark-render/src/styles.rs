//! Style configuration for the renderer.
//!
//! Every element the renderer emits carries an inline `style` attribute taken
//! from a [`Styles`] value. Callers supply a partial [`StyleOverrides`] which
//! is merged over the built-in defaults per key; the merged configuration is
//! immutable for the duration of a render call.

use serde::{Deserialize, Serialize};

/// Complete style configuration: one CSS declaration string per element kind.
///
/// The strings are opaque to the renderer; they are emitted verbatim into the
/// `style` attribute of the corresponding wrapper element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Styles {
  pub h1:         String,
  pub h2:         String,
  pub h3:         String,
  pub h4:         String,
  pub h5:         String,
  pub h6:         String,
  /// Paragraph wrapper.
  pub p:          String,
  /// Anchors emitted by the link handler.
  pub a:          String,
  pub ul:         String,
  pub ol:         String,
  pub li:         String,
  pub blockquote: String,
  pub img:        String,
  pub b:          String,
  pub i:          String,
  /// Inline code spans.
  pub code:       String,
  /// Fenced code blocks.
  pub pre:        String,
  /// `<bgc>` background-color blocks.
  pub bgc:        String,
  /// Base style prepended to the user style of `<custom>` spans.
  pub custom:     String,
  /// Fallback for `<align>` blocks with an unrecognized alignment value.
  pub align:      String,
  /// Outer container of a `<columns>` layout.
  pub section:    String,
  /// `<poetry>` blocks (whitespace-preserving).
  pub poetry:     String,
  pub table:      String,
  /// Table header cells.
  pub th:         String,
  /// Table data cells.
  pub td:         String,
  /// Checkbox spans rendered from `[ ]`/`[x]` tokens.
  pub checkbox:   String,
  /// `<background>` blocks.
  pub background: String,
}

/// Partial style configuration supplied by the caller.
///
/// Any field left `None` falls back to the built-in default for that element
/// kind. Deserializes from JSON with all fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleOverrides {
  pub h1:         Option<String>,
  pub h2:         Option<String>,
  pub h3:         Option<String>,
  pub h4:         Option<String>,
  pub h5:         Option<String>,
  pub h6:         Option<String>,
  pub p:          Option<String>,
  pub a:          Option<String>,
  pub ul:         Option<String>,
  pub ol:         Option<String>,
  pub li:         Option<String>,
  pub blockquote: Option<String>,
  pub img:        Option<String>,
  pub b:          Option<String>,
  pub i:          Option<String>,
  pub code:       Option<String>,
  pub pre:        Option<String>,
  pub bgc:        Option<String>,
  pub custom:     Option<String>,
  pub align:      Option<String>,
  pub section:    Option<String>,
  pub poetry:     Option<String>,
  pub table:      Option<String>,
  pub th:         Option<String>,
  pub td:         Option<String>,
  pub checkbox:   Option<String>,
  pub background: Option<String>,
}

impl Default for Styles {
  fn default() -> Self {
    Self {
      h1: "font-size:2rem;color:var(--color-link);font-weight:600;margin:1.2em 0 0.6em 0;line-height:1.2;".into(),
      h2: "font-size:1.5rem;color:var(--color-link);font-weight:600;margin:1.2em 0 0.6em 0;line-height:1.2;".into(),
      h3: "font-size:1.2rem;color:var(--color-link);font-weight:600;margin:1.2em 0 0.6em 0;line-height:1.2;".into(),
      h4: "font-size:1.1rem;color:var(--color-link);font-weight:600;margin:1.2em 0 0.6em 0;line-height:1.2;".into(),
      h5: "font-size:1rem;color:var(--color-link);font-weight:600;margin:1.2em 0 0.6em 0;line-height:1.2;".into(),
      h6: "font-size:0.95rem;color:var(--color-link);font-weight:600;margin:1.2em 0 0.6em 0;line-height:1.2;".into(),
      p: "margin:0.7em 0;color:var(--color-text);font-size:1.05rem;".into(),
      a: "color:var(--color-link);text-decoration:underline;word-break:break-all;".into(),
      ul: "margin:0.7em 0 0.7em 1.5em;".into(),
      ol: "margin:0.7em 0 0.7em 1.5em;".into(),
      li: "margin-bottom:0.3em;".into(),
      blockquote: "border-left:4px solid var(--color-link);background:var(--color-bg-alt);padding:0.7em 1em;margin:1em 0;color:var(--color-text);border-radius:6px;".into(),
      img: "max-width:100%;display:block;margin:1em auto;border-radius:6px;box-shadow:0 1px 4px var(--color-card-shadow);".into(),
      b: "font-weight:700;".into(),
      i: "font-style:italic;".into(),
      code: "background:var(--color-secondary);color:var(--color-link);padding:0.15em 0.4em;border-radius:4px;font-size:0.98em;".into(),
      pre: "display:block;padding:1em;overflow-x:auto;background:var(--color-bg-alt);border-radius:8px;".into(),
      bgc: "padding:0.7em 1em;border-radius:8px;margin:1em 0;background:var(--color-bg-alt);color:var(--color-text);".into(),
      // No built-in default; the author supplies the full style.
      custom: String::new(),
      align: "text-align:center;".into(),
      section: "margin:1em 0; overflow:hidden;".into(),
      poetry: "font-family:serif;font-style:italic;white-space:pre-line;padding:1em 1.5em;margin:1.2em 0;line-height:1.7;".into(),
      table: "border-collapse:collapse;width:100%;margin:1.2em 0;background:var(--color-bg-alt);border-radius:8px;overflow:hidden;box-shadow:0 1px 4px var(--color-card-shadow);".into(),
      th: "padding:0.6em 1em;background:var(--color-link);color:#fff;font-weight:700;text-align:left;border-bottom:2px solid var(--color-link);".into(),
      td: "padding:0.6em 1em;border-bottom:1px solid var(--color-bg);".into(),
      checkbox: "display:inline-block;width:1.1em;height:1.1em;margin-right:0.5em;vertical-align:-0.15em;border:2px solid var(--color-link);border-radius:4px;background:var(--color-bg);".into(),
      background: String::new(),
    }
  }
}

macro_rules! merge_fields {
  ($styles:expr, $overrides:expr, $($field:ident),+ $(,)?) => {
    $(
      if let Some(value) = $overrides.$field {
        $styles.$field = value;
      }
    )+
  };
}

impl Styles {
  /// Merge caller overrides over the built-in defaults. Override values win
  /// per key; defaults fill the rest.
  #[must_use]
  pub fn with_overrides(overrides: StyleOverrides) -> Self {
    let mut styles = Self::default();
    merge_fields!(
      styles, overrides, h1, h2, h3, h4, h5, h6, p, a, ul, ol, li, blockquote,
      img, b, i, code, pre, bgc, custom, align, section, poetry, table, th,
      td, checkbox, background
    );
    styles
  }
}
