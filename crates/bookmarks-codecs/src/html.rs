//! HTML import and export shared by all dialects
//!
//! Dialects differ only in the header/footer, which special folders are
//! dropped or spliced into their parent on export, how the parsed top
//! container is rearranged on import and how special folders are
//! recognised.

use bookmarks_html::{format_html, indent_html, parse_document, HtmlNode, IdCounter};
use bookmarks_model::timestamp::{micros_to_seconds, now_micros};
use bookmarks_model::{Bookmark, Folder, SpecialFolder, Url};

use crate::codec::finish_tree;
use crate::Result;

/// Id of the root folder synthesized around an imported document.
pub(crate) const HTML_ROOT_ID: i64 = 1;

pub(crate) trait HtmlDialect {
    const HEADER: &'static str;
    const FOOTER: &'static str;

    /// Folders that write no `<H3>`/`<DL>` of their own on export.
    const UNWRAPPED: &'static [SpecialFolder];

    /// Folder dropped with its contents on export, wherever it sits.
    const SKIPPED: Option<SpecialFolder>;

    fn folder_line(folder: &Folder) -> String;

    fn url_line(url: &Url) -> String;

    /// Wrap the parsed top container in a synthesized root.
    fn restructure(container: HtmlNode) -> HtmlNode;

    /// Special tag for a direct child of the root.
    fn special_folder(node: &HtmlNode) -> Option<SpecialFolder>;

    /// Title that replaces the document's own for a tagged folder.
    fn canonical_title(_tag: SpecialFolder) -> Option<&'static str> {
        None
    }
}

enum Emit<'a> {
    Node(&'a Bookmark),
    Close,
}

pub(crate) fn write_html<D: HtmlDialect>(tree: &Folder) -> String {
    let mut body = String::from(D::HEADER);

    let mut stack: Vec<Emit<'_>> = tree.iter().rev().map(Emit::Node).collect();

    while let Some(item) = stack.pop() {
        match item {
            Emit::Close => body.push_str("</DL><p>\n"),
            Emit::Node(Bookmark::Url(url)) => body.push_str(&D::url_line(url)),
            Emit::Node(Bookmark::Folder(folder)) => {
                if D::SKIPPED.is_some() && folder.special_folder == D::SKIPPED {
                    tracing::warn!(
                        title = %folder.title,
                        special_folder = ?folder.special_folder,
                        "Skipping folder not supported in HTML export"
                    );
                    continue;
                }

                let unwrapped = folder
                    .special_folder
                    .is_some_and(|tag| D::UNWRAPPED.contains(&tag));
                if !unwrapped {
                    body.push_str(&D::folder_line(folder));
                    body.push_str("<DL><p>\n");
                    stack.push(Emit::Close);
                }
                stack.extend(folder.iter().rev().map(Emit::Node));
            }
        }
    }

    body.push_str(D::FOOTER);
    indent_html(&body)
}

pub(crate) fn read_html<D: HtmlDialect>(html: &str) -> Result<Folder> {
    let formatted = format_html(html);
    let mut ids = IdCounter::default();
    let container = parse_document(&formatted, &mut ids)?;
    let root = D::restructure(container);
    let now = now_micros();

    let (root, children) = root.into_folder(0, now);
    let mut current = (root, children.into_iter());
    let mut parents = Vec::new();

    loop {
        let index = current.0.children.len() as i64;

        match current.1.next() {
            Some(node) if node.is_folder() => {
                let tag = if parents.is_empty() { D::special_folder(&node) } else { None };
                let (mut folder, children) = node.into_folder(index, now);
                if let Some(title) = tag.and_then(D::canonical_title) {
                    folder.title = title.to_string();
                }
                folder.special_folder = tag;
                parents.push(std::mem::replace(&mut current, (folder, children.into_iter())));
            }
            Some(node) => {
                let url = node.into_url(index, now)?;
                current.0.children.push(url.into());
            }
            None => match parents.pop() {
                Some(parent) => {
                    let (done, _) = std::mem::replace(&mut current, parent);
                    current.0.children.push(done.into());
                }
                None => return Ok(finish_tree(current.0)),
            },
        }
    }
}

/// ` ADD_DATE` and ` LAST_MODIFIED` in seconds. A zero modification date is
/// left out unless `always_modified`.
pub(crate) fn date_attrs(date_added: i64, date_modified: i64, always_modified: bool) -> String {
    let mut attrs = format!(" ADD_DATE=\"{}\"", micros_to_seconds(date_added));
    if always_modified || date_modified != 0 {
        attrs.push_str(&format!(
            " LAST_MODIFIED=\"{}\"",
            micros_to_seconds(date_modified)
        ));
    }
    attrs
}
