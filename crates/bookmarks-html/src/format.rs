//! Line-level rewriting of Netscape bookmark HTML

use regex::Regex;
use std::sync::LazyLock;

pub const HTML_INDENT: &str = "    ";

/// One pattern per element kind so the text always ends at the closing tag
/// of the same name, even when it contains escaped `&lt;`/`&gt;`.
static ELEMENTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [("H1", "H3"), ("H3", "H3"), ("A", "A")]
        .into_iter()
        .filter_map(|(tag, replacement)| {
            Regex::new(&format!(r"<{tag}\b([^>]*)>(.*?)</{tag}>"))
                .ok()
                .map(|regex| (regex, replacement))
        })
        .collect()
});

/// Rewrite a bookmark file into strictly nested elements.
///
/// - `<H1>` becomes the outermost `<H3>` container.
/// - `<H3>` and `<A>` text moves into a `TITLE` attribute.
/// - `<DT>` markers and `<DL><p>` list openers are dropped.
/// - `</DL><p>` and `</DL>` close the enclosing `<H3>`.
///
/// The result is a single line.
pub fn format_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());

    for line in html.lines() {
        out.push_str(format_line(line).trim());
    }

    tracing::debug!(input = html.len(), output = out.len(), "Formatted bookmark HTML");
    out
}

fn format_line(line: &str) -> String {
    let mut line = line.to_string();

    for (regex, replacement) in ELEMENTS.iter() {
        if regex.is_match(&line) {
            line = regex
                .replace(&line, |caps: &regex::Captures<'_>| {
                    let title = caps[2].replace('"', "&quot;");
                    format!("<{replacement}{} TITLE=\"{title}\">", &caps[1])
                })
                .into_owned();
            break;
        }
    }

    line.replace("<DL><p>", "")
        .replace("<DT>", "")
        .replace("<H1", "<H3")
        .replace("</H1>", "")
        .replace("</H3>", "")
        .replace("</DL><p>", "</H3>")
        .replace("</DL>", "</H3>")
}

/// Indent generated bookmark HTML, one [`HTML_INDENT`] per open `<DL><p>`.
pub fn indent_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len() * 2);
    let mut depth: usize = 0;

    for line in html.lines() {
        if line.starts_with("</DL>") {
            depth = depth.saturating_sub(1);
        }

        for _ in 0..depth {
            out.push_str(HTML_INDENT);
        }
        out.push_str(line);
        out.push('\n');

        if line.starts_with("<DL><p>") {
            depth += 1;
        }
    }

    out
}
