//! Bookmarks HTML
//!
//! Netscape bookmark files are not well formed: `<DT>` is never closed and
//! folder nesting is implied by `<DL><p>` lists. Import runs in two steps:
//!
//! 1. [`format_html`] rewrites every folder/link line into a strictly nested
//!    `<H3 ... TITLE="...">` / `<A ... TITLE="...">` element and turns list
//!    ends into `</H3>`.
//! 2. [`parse_document`] builds a typed [`HtmlNode`] tree from that text.
//!
//! Export goes the other way through [`indent_html`].

mod error;
mod escape;
mod format;
mod node;
mod parse;

pub use error::HtmlError;
pub use escape::{escape_attr, escape_html, unescape_html};
pub use format::{format_html, indent_html, HTML_INDENT};
pub use node::{HtmlFlags, HtmlNode, HtmlNodeKind, IdCounter, FIRST_HTML_ID};
pub use parse::parse_document;

pub type Result<T> = std::result::Result<T, HtmlError>;
