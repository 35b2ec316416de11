//! Nested-tag parser for formatted bookmark HTML
//!
//! Only three tags matter after [`format_html`](crate::format_html):
//! `<H3 ...>` opens a folder, `</H3>` closes it and `<A ...>` is a link
//! with no closing tag. Everything else (doctype, comments, meta, title,
//! stray text) is skipped.

use crate::escape::unescape_html;
use crate::node::{HtmlFlags, HtmlNode, HtmlNodeKind, IdCounter};
use crate::{HtmlError, Result};

/// A start or end tag with lower-cased name and attribute keys.
#[derive(Debug, PartialEq, Eq)]
struct Tag<'a> {
    name: String,
    closing: bool,
    attrs: Vec<(String, &'a str)>,
}

/// Parse formatted HTML and return the first (outermost) folder element.
///
/// Ids are drawn from `ids` in document order.
pub fn parse_document(formatted: &str, ids: &mut IdCounter) -> Result<HtmlNode> {
    let mut stack: Vec<HtmlNode> = Vec::new();
    let mut rest = formatted;

    while let Some(lt) = rest.find('<') {
        rest = &rest[lt..];

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = match after.find("-->") {
                Some(end) => &after[end + 3..],
                None => "",
            };
            continue;
        }

        let Some((tag, consumed)) = read_tag(rest) else {
            rest = &rest[1..];
            continue;
        };
        rest = &rest[consumed..];

        match (tag.name.as_str(), tag.closing) {
            ("h3", false) => {
                stack.push(build_node(HtmlNodeKind::Folder, &tag, ids)?);
            }
            ("a", false) => {
                let link = build_node(HtmlNodeKind::Link, &tag, ids)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(link);
                }
            }
            ("h3", true) => {
                if let Some(done) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(done),
                        None => return Ok(done),
                    }
                }
            }
            _ => {}
        }
    }

    // Unterminated lists close at end of input.
    let mut container = stack.pop().ok_or(HtmlError::NoContainer)?;
    while let Some(mut parent) = stack.pop() {
        parent.children.push(container);
        container = parent;
    }
    Ok(container)
}

fn build_node(kind: HtmlNodeKind, tag: &Tag<'_>, ids: &mut IdCounter) -> Result<HtmlNode> {
    let mut node = HtmlNode::new(kind, ids.next_id());
    let mut flags = HtmlFlags::default();

    for (key, raw) in &tag.attrs {
        let value = unescape_html(raw);
        match key.as_str() {
            "title" => node.title = Some(value),
            "add_date" => node.add_date = parse_seconds(key, &value)?,
            "last_modified" => node.last_modified = parse_seconds(key, &value)?,
            "href" => node.href = Some(value),
            "icon" => node.icon = Some(value),
            "icon_uri" | "iconuri" => node.icon_uri = Some(value),
            "tags" => {
                node.tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "personal_toolbar_folder" => flags.toolbar = true,
            "unfiled_bookmarks_folder" => flags.unfiled = true,
            "mobile_bookmarks_folder" => flags.mobile = true,
            _ => {}
        }
    }

    node.flags = flags;
    Ok(node)
}

/// An empty value counts as missing.
fn parse_seconds(attribute: &str, value: &str) -> Result<Option<i64>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| HtmlError::InvalidNumber {
            attribute: attribute.to_uppercase(),
            value: value.to_string(),
        })
}

/// Read one tag at the start of `s`, returning it and the bytes consumed.
///
/// Returns `None` when `s` does not start with a well-formed tag, in which
/// case the `<` is treated as text.
fn read_tag(s: &str) -> Option<(Tag<'_>, usize)> {
    let bytes = s.as_bytes();
    let mut pos = 1;

    let closing = bytes.get(pos) == Some(&b'/');
    if closing {
        pos += 1;
    }

    let name_start = pos;
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    if pos == name_start {
        // `<!DOCTYPE ...>` and friends
        if bytes.get(pos) == Some(&b'!') {
            let end = s[pos..].find('>')?;
            return Some((
                Tag {
                    name: String::new(),
                    closing: false,
                    attrs: Vec::new(),
                },
                pos + end + 1,
            ));
        }
        return None;
    }
    let name = s[name_start..pos].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        match bytes.get(pos) {
            None => return None,
            Some(b'>') => {
                pos += 1;
                break;
            }
            Some(_) => {}
        }

        let key_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        let key = s[key_start..pos].to_ascii_lowercase();

        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            attrs.push((key, ""));
            continue;
        }
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let value = match bytes.get(pos) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let start = pos + 1;
                let len = s[start..].find(quote as char)?;
                pos = start + len + 1;
                &s[start..start + len]
            }
            Some(_) => {
                let start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>'
                {
                    pos += 1;
                }
                &s[start..pos]
            }
            None => return None,
        };
        attrs.push((key, value));
    }

    Some((
        Tag {
            name,
            closing,
            attrs,
        },
        pos,
    ))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}
