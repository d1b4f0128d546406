//! Markdown to HTML conversion for prose channels.

use pulldown_cmark::{html, Event, Options, Parser};

/// Render CommonMark text to an HTML fragment.
///
/// Strikethrough, tables, footnotes and task lists are enabled. Raw HTML in
/// the source is demoted to text so that transcript content can never inject
/// markup into the page.
pub fn render_markdown_text(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(html) => Event::Text(html),
        Event::InlineHtml(html) => Event::Text(html),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

// ===== Tests =====
