#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
/// Check that the HTML output contains all expected substrings.
fn assert_html_contains(html: &str, expected: &[&str]) {
  for &needle in expected {
    assert!(
      html.contains(needle),
      "Expected HTML to contain '{needle}', but it did not.\nFull \
       HTML:\n{html}"
    );
  }
}

/// Check that the HTML output contains none of the given substrings.
fn assert_html_lacks(html: &str, unexpected: &[&str]) {
  for &needle in unexpected {
    assert!(
      !html.contains(needle),
      "Expected HTML to NOT contain '{needle}', but it did.\nFull \
       HTML:\n{html}"
    );
  }
}

fn cm_html(md: &str) -> String {
  coffeemark_render::Renderer::default().render(md)
}

#[test]
fn test_bgc_with_colors() {
  let html = cm_html("<bgc bg:#ff0000 text:#00ff00>Colored</bgc>");
  assert_html_contains(&html, &[
    "<div style=\"padding:0.7em 1em;",
    "background:#ff0000;",
    "color:#00ff00;",
    ">Colored</div>",
  ]);
}

#[test]
fn test_bgc_without_attributes_keeps_defaults() {
  let html = cm_html("<bgc>plain</bgc>");
  assert_html_contains(&html, &["<div style=\"", ">plain</div>"]);
  assert_html_lacks(&html, &["&lt;bgc"]);
}

#[test]
fn test_background_color_and_text() {
  let html = cm_html("<background color:red text:#fff>Body</background>");
  assert_html_contains(&html, &[
    "background:red;",
    "color:#fff;",
    ">Body</div>",
  ]);
}

#[test]
fn test_background_image_quoted() {
  let html =
    cm_html("<background image:\"https://x.example/hero.png\">Hero</background>");
  assert_html_contains(&html, &[
    "background-image:url('https://x.example/hero.png');",
    "background-size:cover;",
    "background-position:center;",
  ]);
}

#[test]
fn test_background_gradient() {
  let html = cm_html(
    "<background gradient:\"linear-gradient(90deg, red, blue)\">G</background>",
  );
  assert_html_contains(&html, &[
    "background-image:linear-gradient(90deg, red, blue);",
  ]);
}

#[test]
fn test_custom_raw_tag() {
  let html = cm_html("<custom style=\"color:red;font-size:2em;\">X</custom>");
  assert_html_contains(&html, &[
    "<span style=\"color:red;font-size:2em;\">X</span>",
  ]);
}

#[test]
fn test_custom_entity_escaped_tag() {
  let md = "&lt;custom style=&quot;color:blue;&quot;&gt;Y&lt;/custom&gt;";
  let html = cm_html(md);
  assert_html_contains(&html, &["<span style=\"color:blue;\">Y</span>"]);
}

#[test]
fn test_custom_entity_escaped_single_quoted_style() {
  let md = "&lt;custom style='color:green;'&gt;Z&lt;/custom&gt;";
  let html = cm_html(md);
  assert_html_contains(&html, &["<span style=\"color:green;\">Z</span>"]);
}

#[test]
fn test_align_known_values() {
  assert_html_contains(&cm_html("<align left>L</align>"), &[
    "<div style=\"text-align:left;\">L</div>",
  ]);
  assert_html_contains(&cm_html("<align right>R</align>"), &[
    "<div style=\"text-align:right;\">R</div>",
  ]);
  assert_html_contains(&cm_html("<align justify>J</align>"), &[
    "text-align:justify; padding:0.8em; margin:1em 0;",
  ]);
}

#[test]
fn test_align_unknown_value_falls_back() {
  let overrides = coffeemark_render::StyleOverrides {
    align: Some("text-align:end;".into()),
    ..Default::default()
  };
  let html = coffeemark_render::render("<align wibble>W</align>", overrides);
  assert_html_contains(&html, &["<div style=\"text-align:end;\">W</div>"]);
}

#[test]
fn test_columns_with_separator() {
  let md = "<columns float=\"left\" width=\"30%\">\n# Side\n---\nMain \
            **body**\n</columns>";
  let html = cm_html(md);
  assert_html_contains(&html, &[
    "<div style=\"margin:1em 0; overflow:hidden;\">",
    "width:30%; float:left; margin-right:1.5em;",
    "<div style=\"overflow:hidden;\">",
    ">Side</h1>",
    "<b style=\"font-weight:700;\">body</b>",
  ]);
}

#[test]
fn test_columns_defaults_and_single_quotes() {
  let html = cm_html("<columns float='right'>\nJust main\n</columns>");
  assert_html_contains(&html, &[
    "width:40%; float:right; margin-left:1.5em;",
    "Just main",
  ]);
}

#[test]
fn test_columns_inner_code_stays_literal() {
  let md =
    "<columns float=\"left\">\n`tick **tock**`\n---\nmain\n</columns>";
  let html = cm_html(md);
  assert_html_contains(&html, &["<code style=\"", "tick **tock**"]);
  assert_html_lacks(&html, &["<b "]);
}

#[test]
fn test_columns_inner_blocks_get_paragraphs() {
  let html = cm_html("<columns float=\"left\">\nside\n---\nmain\n</columns>");
  assert_html_contains(&html, &[">side</p>", ">main</p>"]);
}

#[test]
fn test_poetry_preserves_line_structure() {
  let html = cm_html("<poetry>\nRoses are red\nViolets are blue\n</poetry>");
  assert_html_contains(&html, &[
    "white-space:pre-line;",
    "Roses are red\nViolets are blue",
  ]);
  assert_html_lacks(&html, &["<p style", "<br>"]);
}

#[test]
fn test_poetry_strips_injected_paragraphs() {
  let html =
    cm_html("<poetry>\n\nStanza one\n\nStanza two\n\n</poetry>");
  assert_html_contains(&html, &["Stanza one", "Stanza two"]);
  assert_html_lacks(&html, &["<p style", "</p>"]);
}

#[test]
fn test_poetry_keeps_inline_markup_while_stripping_paragraphs() {
  let html = cm_html("<poetry>\n\nA **bold** stanza\n\nAnother one\n\n</poetry>");
  assert_html_contains(&html, &[
    "<b style=\"font-weight:700;\">bold</b>",
    "Another one",
  ]);
  assert_html_lacks(&html, &["<p style", "</p>"]);
}

#[test]
fn test_malformed_extension_is_left_as_text() {
  // No closing tag: the columns handler must not fire, and the sanitizer
  // passes the allow-listed opening tag through as-is.
  let html = cm_html("<columns float=\"left\">\norphan");
  assert_html_lacks(&html, &["float:left; margin-right:1.5em;"]);
  assert_html_contains(&html, &["orphan"]);
}

#[test]
fn test_extension_blocks_are_not_paragraph_wrapped() {
  let html = cm_html("<align center>centered</align>\n\nafter");
  assert_html_lacks(&html, &["<p style=\"margin:0.7em 0;color:var(--color-text);font-size:1.05rem;\"><div"]);
  assert_html_contains(&html, &[">after</p>"]);
}
