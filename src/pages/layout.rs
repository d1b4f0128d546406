//! Shared page chrome: document shell, embedded stylesheet, pagination nav.
//!
//! Every output file is a self-contained HTML document; the stylesheet is
//! embedded so a page set can be copied anywhere without asset references
//! breaking.

const STYLE: &str = r#"* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: system-ui, -apple-system, sans-serif;
  background: #fafaf8;
  color: #1f2328;
  padding: 24px;
  max-width: 860px;
  margin: 0 auto;
  line-height: 1.5;
}
a { color: #0969da; text-decoration: none; }
a:hover { text-decoration: underline; }
h1 { font-size: 1.4rem; margin-bottom: 4px; }
h2 { font-size: 1.1rem; margin: 20px 0 10px 0; color: #57606a; }
.page-header { margin-bottom: 16px; }
.page-meta { color: #57606a; font-size: 0.8125rem; }
nav.pager { display: flex; gap: 16px; margin: 16px 0; font-size: 0.875rem; }
section.turn { border: 1px solid #d8dee4; border-radius: 6px; padding: 12px 16px; margin: 12px 0; background: #ffffff; }
section.turn.user { border-left: 3px solid #0969da; }
section.turn.assistant { border-left: 3px solid #8250df; }
section.turn.tool-output { padding: 6px 10px; background: #f6f8fa; }
.turn-header { display: flex; justify-content: space-between; margin-bottom: 8px; }
.turn-role { font-weight: 600; font-size: 0.8125rem; text-transform: uppercase; color: #57606a; }
.turn-time { color: #8c959f; font-size: 0.75rem; font-family: monospace; }
.message-text p { margin: 8px 0; }
.message-text pre { margin: 8px 0; }
details.thinking { margin: 8px 0; border-left: 3px solid #d8dee4; padding-left: 10px; color: #57606a; }
details.thinking summary { cursor: pointer; font-size: 0.8125rem; }
.thinking-body { font-size: 0.875rem; }
.tool-call { margin: 8px 0; border: 1px solid #d8dee4; border-radius: 6px; overflow: hidden; }
.tool-header { background: #f6f8fa; padding: 6px 10px; font-size: 0.8125rem; font-weight: 600; }
.tool-header code { font-weight: 400; }
.tool-caption { padding: 4px 10px; font-size: 0.8125rem; color: #57606a; }
pre { background: #f6f8fa; padding: 10px; overflow-x: auto; font-size: 0.8125rem; line-height: 1.45; white-space: pre-wrap; word-break: break-word; }
pre.tool-result { border: 1px solid #d8dee4; border-radius: 6px; margin: 8px 0; }
pre.tool-result.error { border-color: #cf222e; background: #fff1f0; }
.todo-list { list-style: none; padding: 6px 10px; }
.todo-list li { padding: 2px 0; font-size: 0.875rem; }
.todo-marker { font-family: monospace; }
.todo-completed { color: #1a7f37; }
.todo-in-progress { color: #9a6700; }
.todo-pending { color: #57606a; }
.edit-old pre { background: #fff1f0; }
.edit-new pre { background: #e6ffec; }
.commit-link { font-family: monospace; }
.stats-line { font-size: 0.875rem; margin: 4px 0; }
.commit-list ul { list-style: none; }
.commit-list li { padding: 3px 0; font-size: 0.875rem; }
.page-list ol { list-style: none; }
.page-list li { padding: 4px 0; }
.page-summary { color: #57606a; font-size: 0.8125rem; margin-left: 10px; }
"#;

/// File name for a 1-based page number, zero-padded so directory listings
/// sort lexically (`page-001.html`, `page-002.html`, ...).
pub fn page_file_name(number: usize) -> String {
    format!("page-{number:03}.html")
}

/// Wrap a body fragment in a complete standalone HTML document.
///
/// The title must already be escaped by the caller.
pub fn page_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         {body}\
         </body>\n\
         </html>\n"
    )
}

/// Previous/index/next links for one page of a set.
///
/// The previous link is absent on the first page and the next link on the
/// last; the index link is always present.
pub fn nav_fragment(number: usize, total: usize) -> String {
    let mut nav = String::from("<nav class=\"pager\">");
    if number > 1 {
        nav.push_str(&format!(
            "<a class=\"prev\" href=\"{}\">&larr; Previous</a>",
            page_file_name(number - 1)
        ));
    }
    nav.push_str("<a class=\"index\" href=\"index.html\">Index</a>");
    if number < total {
        nav.push_str(&format!(
            "<a class=\"next\" href=\"{}\">Next &rarr;</a>",
            page_file_name(number + 1)
        ));
    }
    nav.push_str("</nav>\n");
    nav
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_file_names_are_zero_padded() {
        assert_eq!(page_file_name(1), "page-001.html");
        assert_eq!(page_file_name(12), "page-012.html");
        assert_eq!(page_file_name(999), "page-999.html");
        // Width grows past three digits rather than truncating.
        assert_eq!(page_file_name(1234), "page-1234.html");
    }

    #[test]
    fn document_is_complete_html() {
        let doc = page_document("My session", "<p>body</p>\n");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>My session</title>"));
        assert!(doc.contains("<style>"));
        assert!(doc.contains("<p>body</p>"));
        assert!(doc.ends_with("</html>\n"));
    }

    #[test]
    fn first_page_has_no_previous_link() {
        let nav = nav_fragment(1, 3);
        assert!(!nav.contains("class=\"prev\""));
        assert!(nav.contains("index.html"));
        assert!(nav.contains("page-002.html"));
    }

    #[test]
    fn last_page_has_no_next_link() {
        let nav = nav_fragment(3, 3);
        assert!(nav.contains("page-002.html"));
        assert!(!nav.contains("class=\"next\""));
    }

    #[test]
    fn middle_page_links_both_neighbors() {
        let nav = nav_fragment(2, 3);
        assert!(nav.contains("href=\"page-001.html\""));
        assert!(nav.contains("href=\"page-003.html\""));
    }

    #[test]
    fn single_page_links_only_the_index() {
        let nav = nav_fragment(1, 1);
        assert!(!nav.contains("class=\"prev\""));
        assert!(!nav.contains("class=\"next\""));
        assert!(nav.contains("index.html"));
    }
}
