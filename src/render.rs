//! Markdown rendering.
//!
//! Converts note content to an HTML fragment for preview and export. Raw and
//! inline HTML in the source is escaped rather than passed through, so note
//! content cannot smuggle script into the rendered output.

use pulldown_cmark::{html, Event, Options, Parser};

/// Renders Markdown source to a sanitized HTML fragment.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    // Demoting HTML events to text makes the HTML writer escape them.
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
