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
fn test_headings_all_levels() {
  let md = "# One\n## Two\n### Three\n#### Four\n##### Five\n###### Six";
  let html = cm_html(md);
  assert_html_contains(&html, &[
    "<h1 style=\"",
    ">One</h1>",
    ">Two</h2>",
    ">Three</h3>",
    ">Four</h4>",
    ">Five</h5>",
    ">Six</h6>",
  ]);
}

#[test]
fn test_heading_overflow_clamps_to_h6() {
  let html = cm_html("####### Seven");
  assert_html_contains(&html, &["<h6 style=\"", "># Seven</h6>"]);
  assert_html_lacks(&html, &["<h7"]);
}

#[test]
fn test_heading_is_not_paragraph_wrapped() {
  let html = cm_html("# Title\n\nBody text.");
  assert_html_lacks(&html, &["<p style=\"margin:0.7em 0;color:var(--color-text);font-size:1.05rem;\"><h1"]);
  assert_html_contains(&html, &[">Title</h1>", "<p style=\"", "Body text."]);
}

#[test]
fn test_bold() {
  let html = cm_html("some **bold** text");
  assert_html_contains(&html, &["<b style=\"font-weight:700;\">bold</b>"]);
}

#[test]
fn test_italic_star_and_underscore() {
  let html = cm_html("*stars* and _underscores_");
  assert_html_contains(&html, &[
    "<i style=\"font-style:italic;\">stars</i>",
    "<i style=\"font-style:italic;\">underscores</i>",
  ]);
}

#[test]
fn test_italic_nested_in_bold() {
  let html = cm_html("**outer *inner* outer**");
  assert_html_contains(&html, &[
    "<b style=\"font-weight:700;\">outer <i style=\"font-style:italic;\">inner</i> outer</b>",
  ]);
}

#[test]
fn test_underline_both_forms() {
  let html = cm_html("__markdown__ and <u>raw</u>");
  assert_html_contains(&html, &[
    "<u style=\"text-decoration:underline;\">markdown</u>",
    "<u style=\"text-decoration:underline;\">raw</u>",
  ]);
}

#[test]
fn test_links_open_in_new_tab() {
  let html = cm_html("[the site](https://example.com/page)");
  assert_html_contains(&html, &[
    "<a href=\"https://example.com/page\" target=\"_blank\" rel=\"noopener\"",
    ">the site</a>",
  ]);
}

#[test]
fn test_image_plain() {
  let html = cm_html("![a cat](https://example.com/cat.png)");
  assert_html_contains(&html, &[
    "<img src=\"https://example.com/cat.png\" alt=\"a cat\"",
    "crossorigin=\"anonymous\"",
  ]);
}

#[test]
fn test_image_proxy_rewrite() {
  let html = cm_html("![pic](img-proxy:http://example.com/x.png)");
  assert_html_contains(&html, &[
    "src=\"/api/image-proxy?url=http%3A%2F%2Fexample.com%2Fx.png\"",
  ]);
}

#[test]
fn test_image_proxy_rejects_short_urls() {
  let html = cm_html("![pic](img-proxy:abc)");
  assert_html_contains(&html, &["<img src=\"\" alt=\"pic\""]);
}

#[test]
fn test_blockquote_lines_collapse() {
  let html = cm_html("> line one\n> line two");
  assert_html_contains(&html, &[
    "<blockquote style=\"",
    ">line one line two</blockquote>",
  ]);
}

#[test]
fn test_code_block_content_is_literal() {
  let html = cm_html("```\nlet x = **1** * _2_;\n```");
  assert_html_contains(&html, &[
    "<pre style=\"",
    "<code style=\"",
    "let x = **1** * _2_;",
  ]);
  assert_html_lacks(&html, &["<b ", "<i "]);
}

#[test]
fn test_code_block_keeps_blank_lines() {
  let html = cm_html("```\nfirst\n\nsecond\n```");
  assert_html_contains(&html, &["first\n\nsecond"]);
  assert_html_lacks(&html, &["<p style", "<br>"]);
}

#[test]
fn test_code_block_escapes_tags() {
  let html = cm_html("```\n<script>alert(1)</script>\n```");
  assert_html_contains(&html, &["&lt;script&gt;alert(1)&lt;/script&gt;"]);
  assert_html_lacks(&html, &["<script"]);
}

#[test]
fn test_inline_code() {
  let html = cm_html("Run `cmd --flag` to start.");
  assert_html_contains(&html, &["<p style=\"", "<code style=\"", "cmd --flag"]);
}

#[test]
fn test_inline_code_content_is_literal() {
  let html = cm_html("a `**not bold**` b");
  assert_html_contains(&html, &["**not bold**"]);
  assert_html_lacks(&html, &["<b "]);
}

#[test]
fn test_unordered_list_with_custom_bullets() {
  let html = cm_html("- alpha\n- beta");
  assert_html_contains(&html, &[
    "<ul style=\"",
    "<li style=\"",
    "<span style=\"margin-right:0.5em;color:#a5b4fc;\">\u{2022}</span>",
    "alpha",
    "beta",
  ]);
}

#[test]
fn test_ordered_list_numbers_by_position() {
  let html = cm_html("5. first\n3. second");
  assert_html_contains(&html, &[
    "<ol style=\"",
    ">1.</span>",
    ">2.</span>",
    "first",
    "second",
  ]);
  assert_html_lacks(&html, &[">5.</span>", ">3.</span>"]);
}

#[test]
fn test_nested_unordered_list() {
  let html = cm_html("- parent\n  - child one\n  - child two\n- sibling");
  assert_eq!(html.matches("<ul style=").count(), 2);
  assert_html_contains(&html, &["parent", "child one", "child two", "sibling"]);
}

#[test]
fn test_ordered_list_nests_unordered_items() {
  let html = cm_html("1. first\n  - detail\n2. second");
  assert_html_contains(&html, &["<ol style=\"", "<ul style=\"", "detail"]);
}

#[test]
fn test_list_item_checkboxes() {
  let html = cm_html("- [x] done\n- [ ] open");
  assert_html_contains(&html, &["&#10003;", "background:var(--color-bg);"]);
  // The raw tokens must be consumed, not rendered as text.
  assert_html_lacks(&html, &["[x]", "[ ]"]);
}

#[test]
fn test_table_with_alignment() {
  let md = "|Name|Qty|Price|\n|:---|---:|:---:|\n|tea|2|3.50|";
  let html = cm_html(md);
  assert_html_contains(&html, &[
    "<table style=\"",
    "<thead><tr>",
    ">Name</th>",
    "text-align:right;\">Qty</th>",
    "text-align:center;\">Price</th>",
    "text-align:right;\">2</td>",
    "text-align:center;\">3.50</td>",
  ]);
}

#[test]
fn test_table_cells_run_inline_markup() {
  let md = "|Col|\n|---|\n|**bold** and [x]|";
  let html = cm_html(md);
  assert_html_contains(&html, &[
    "<b style=\"font-weight:700;\">bold</b>",
    "&#10003;",
  ]);
}

#[test]
fn test_paragraphs_and_line_breaks() {
  let html = cm_html("one\ntwo\n\nthree");
  assert_html_contains(&html, &["one<br>two", ">three</p>"]);
  assert_eq!(html.matches("<p style=").count(), 2);
}

#[test]
fn test_escaped_newline_becomes_br() {
  let html = cm_html("start\\nend");
  assert_html_contains(&html, &["start<br>end"]);
}

#[test]
fn test_disallowed_tags_are_escaped() {
  let html = cm_html("<script src=\"evil.js\">alert('hi')</script>");
  assert_html_lacks(&html, &["<script"]);
  assert_html_contains(&html, &[
    "&lt;script src=&quot;evil.js&quot;&gt;",
    "&lt;/script&gt;",
  ]);
}

#[test]
fn test_allowed_raw_tags_survive() {
  let html = cm_html("raw <b>bold</b> passes");
  assert_html_contains(&html, &["<b>bold</b>"]);
}

#[test]
fn test_whitespace_only_input_is_empty() {
  assert_eq!(cm_html("   \n\t \n"), "");
}

#[test]
fn test_style_overrides_flow_through_render() {
  let overrides = coffeemark_render::StyleOverrides {
    h1: Some("font-size:4rem;".into()),
    ..Default::default()
  };
  let html = coffeemark_render::render("# Big", overrides);
  assert_html_contains(&html, &["<h1 style=\"font-size:4rem;\">Big</h1>"]);
}
