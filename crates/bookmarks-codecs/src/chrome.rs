//! Chrome dialect
//!
//! Chrome's JSON `Bookmarks` file stores microseconds since 1601-01-01 as
//! strings, numbers ids from 0 and has no root folder: the top-level
//! folders hang off a `roots` map. Its HTML export has no menu and writes
//! the contents of "Other bookmarks" straight into the top-level list.

use serde::Serialize;
use serde_json::{json, Value};

use bookmarks_html::{escape_attr, escape_html, HtmlNode, HtmlNodeKind};
use bookmarks_model::guid::{ensure_uuid, new_uuid};
use bookmarks_model::{Bookmark, Folder, SpecialFolder, Url};

use crate::codec::{finish_tree, Codec, Dialect, Format};
use crate::html::{date_attrs, read_html, write_html, HtmlDialect, HTML_ROOT_ID};
use crate::json::{
    as_object, children_field, dump_tree, int_field, load_tree, parse_object, require,
    required_int, required_str, str_field, tags_field, to_object, Decoded, Object,
};
use crate::{CodecError, Result};

/// Microseconds between 1601-01-01 and 1970-01-01.
pub const CHROME_EPOCH_OFFSET: i64 = 11_644_473_600_000_000;

pub const BOOKMARK_BAR_FLAG: &str = "PERSONAL_TOOLBAR_FOLDER";

const ROOT_TITLE: &str = "root";
const BOOKMARK_BAR_TITLE: &str = "Bookmarks bar";
const OTHER_TITLE: &str = "Other bookmarks";
const MOBILE_TITLE: &str = "Mobile bookmarks";

const ROOT_BOOKMARK_BAR: &str = "bookmark_bar";
const ROOT_OTHER: &str = "other";
const ROOT_SYNCED: &str = "synced";

const CHROME_HEADER: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
"#;

const TYPE_FOLDER: &str = "folder";
const TYPE_URL: &str = "url";

/// Unix microseconds to Chrome microseconds. Zero stays zero (unset).
pub fn as_chrome_timestamp(timestamp: i64) -> i64 {
    if timestamp == 0 {
        return 0;
    }
    timestamp.saturating_add(CHROME_EPOCH_OFFSET)
}

/// Chrome microseconds to Unix microseconds. Zero stays zero (unset).
pub fn from_chrome_timestamp(timestamp: i64) -> i64 {
    if timestamp == 0 {
        return 0;
    }
    timestamp.saturating_sub(CHROME_EPOCH_OFFSET)
}

fn root_key(tag: SpecialFolder) -> Option<(&'static str, &'static str)> {
    match tag {
        SpecialFolder::Toolbar => Some((ROOT_BOOKMARK_BAR, BOOKMARK_BAR_TITLE)),
        SpecialFolder::Other => Some((ROOT_OTHER, OTHER_TITLE)),
        SpecialFolder::Mobile => Some((ROOT_SYNCED, MOBILE_TITLE)),
        SpecialFolder::Root | SpecialFolder::Menu => None,
    }
}

fn root_tag(key: &str) -> Option<SpecialFolder> {
    match key {
        ROOT_BOOKMARK_BAR => Some(SpecialFolder::Toolbar),
        ROOT_OTHER => Some(SpecialFolder::Other),
        ROOT_SYNCED => Some(SpecialFolder::Mobile),
        _ => None,
    }
}

/// Chrome ids start from 0 while ours reserve 1 for the root.
fn chrome_id(id: i64) -> String {
    id.saturating_sub(1).max(0).to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Chrome;

impl HtmlDialect for Chrome {
    const HEADER: &'static str = CHROME_HEADER;
    const FOOTER: &'static str = "</DL><p>\n";
    const UNWRAPPED: &'static [SpecialFolder] = &[SpecialFolder::Other, SpecialFolder::Mobile];
    const SKIPPED: Option<SpecialFolder> = Some(SpecialFolder::Menu);

    fn folder_line(folder: &Folder) -> String {
        let mut line = format!(
            "<DT><H3{}",
            date_attrs(folder.date_added, folder.date_modified, true)
        );

        let title = if folder.special_folder == Some(SpecialFolder::Toolbar) {
            line.push_str(&format!(" {BOOKMARK_BAR_FLAG}=\"true\""));
            BOOKMARK_BAR_TITLE
        } else {
            folder.title.as_str()
        };

        line.push_str(&format!(">{}</H3>\n", escape_html(title)));
        line
    }

    fn url_line(url: &Url) -> String {
        let mut line = format!(
            "<DT><A HREF=\"{}\"{}",
            escape_attr(&url.url),
            date_attrs(url.date_added, 0, false)
        );
        if !url.icon.is_empty() {
            line.push_str(&format!(" ICON=\"{}\"", escape_attr(&url.icon)));
        }
        line.push_str(&format!(">{}</A>\n", escape_html(&url.title)));
        line
    }

    /// The `<H1>` container becomes "Other bookmarks"; the bookmarks bar
    /// inside it moves to the front of the root.
    fn restructure(mut container: HtmlNode) -> HtmlNode {
        let mut root = HtmlNode::new(HtmlNodeKind::Folder, HTML_ROOT_ID);
        root.title = Some(ROOT_TITLE.to_string());
        container.title = Some(OTHER_TITLE.to_string());

        let bar = container
            .children
            .iter()
            .position(|child| {
                child.is_folder() && (child.flags.toolbar || child.title() == BOOKMARK_BAR_TITLE)
            })
            .map(|i| container.children.remove(i));

        root.children.extend(bar);
        root.children.push(container);
        root
    }

    fn special_folder(node: &HtmlNode) -> Option<SpecialFolder> {
        if node.flags.toolbar || node.title() == BOOKMARK_BAR_TITLE {
            Some(SpecialFolder::Toolbar)
        } else if node.title() == OTHER_TITLE {
            Some(SpecialFolder::Other)
        } else {
            None
        }
    }
}

#[derive(Serialize)]
struct FolderRecord<'a> {
    children: [(); 0],
    date_added: String,
    date_last_used: &'static str,
    date_modified: String,
    guid: String,
    id: String,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct UrlRecord<'a> {
    date_added: String,
    date_last_used: &'static str,
    guid: String,
    id: String,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    url: &'a str,
}

fn folder_record(folder: &Folder) -> Result<Object> {
    to_object(&FolderRecord {
        children: [],
        date_added: as_chrome_timestamp(folder.date_added).to_string(),
        date_last_used: "0",
        date_modified: as_chrome_timestamp(folder.date_modified).to_string(),
        guid: ensure_uuid(&folder.guid),
        id: chrome_id(folder.id),
        name: &folder.title,
        kind: TYPE_FOLDER,
    })
}

fn url_record(url: &Url) -> Result<Object> {
    to_object(&UrlRecord {
        date_added: as_chrome_timestamp(url.date_added).to_string(),
        date_last_used: "0",
        guid: ensure_uuid(&url.guid),
        id: chrome_id(url.id),
        name: &url.title,
        kind: TYPE_URL,
        url: &url.url,
    })
}

fn decode_node(value: &Value) -> Result<Decoded<'_>> {
    let obj = as_object(value, "children")?;

    let raw_id = required_int(obj, "id")?;
    let id = raw_id.checked_add(1).ok_or_else(|| CodecError::InvalidField {
        field: "id".to_string(),
        value: raw_id.to_string(),
    })?;
    let guid = str_field(obj, "guid")?
        .map(|guid| ensure_uuid(&guid))
        .unwrap_or_else(new_uuid);
    let title = str_field(obj, "name")?;
    let date_added = from_chrome_timestamp(int_field(obj, "date_added")?.unwrap_or(0));
    let date_modified = from_chrome_timestamp(int_field(obj, "date_modified")?.unwrap_or(0));

    match required_str(obj, "type")?.as_str() {
        TYPE_FOLDER => Ok(Decoded::Folder(
            Folder {
                id,
                guid,
                index: 0,
                title: title.unwrap_or_default(),
                date_added,
                date_modified,
                special_folder: None,
                children: Vec::new(),
            },
            children_field(obj)?,
        )),
        TYPE_URL => {
            let url = required_str(obj, "url")?;
            Ok(Decoded::Url(Url {
                id,
                guid,
                index: 0,
                title: title.unwrap_or_else(|| url.clone()),
                date_added,
                date_modified,
                icon: str_field(obj, "icon")?.unwrap_or_default(),
                icon_uri: str_field(obj, "iconuri")?.unwrap_or_default(),
                tags: tags_field(obj, "tags")?,
                url,
            }))
        }
        other => Err(CodecError::UnsupportedType(other.to_string())),
    }
}

/// Bookmark nodes carry a `type`; `meta_info` and similar entries do not.
fn is_node(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key("type"))
}

impl Codec for Chrome {
    fn dialect(&self) -> Dialect {
        Dialect::Chrome
    }

    fn formats(&self) -> &'static [Format] {
        &[Format::Html, Format::Json]
    }

    fn from_html(&self, html: &str) -> Result<Folder> {
        read_html::<Self>(html)
    }

    fn as_html(&self, tree: &Folder) -> Result<String> {
        Ok(write_html::<Self>(tree))
    }

    fn from_json(&self, json: &str) -> Result<Folder> {
        let document = parse_object(json)?;
        let roots = as_object(require(as_object(&document, "<document>")?, "roots")?, "roots")?;

        let mut root = Folder {
            id: HTML_ROOT_ID,
            guid: new_uuid(),
            title: ROOT_TITLE.to_string(),
            special_folder: Some(SpecialFolder::Root),
            ..Default::default()
        };

        for (key, value) in roots {
            if !is_node(value) {
                tracing::debug!(key = %key, "Ignoring non-bookmark entry in roots");
                continue;
            }

            match decode_node(value)? {
                Decoded::Folder(mut folder, children) => {
                    folder.special_folder = root_tag(key);
                    root.children.push(load_tree(folder, children, decode_node)?.into());
                }
                Decoded::Url(url) => root.children.push(url.into()),
                Decoded::Skip => {}
            }
        }

        Ok(finish_tree(root))
    }

    fn as_json(&self, tree: &Folder) -> Result<Value> {
        let mut roots = Object::new();

        for child in tree.iter() {
            let folder = match child {
                Bookmark::Url(url) => {
                    tracing::warn!(url = %url.url, "Skipping url at root, not supported by Chrome");
                    continue;
                }
                Bookmark::Folder(folder) => folder,
            };

            let Some((key, title)) = folder.special_folder.and_then(root_key) else {
                tracing::warn!(
                    title = %folder.title,
                    special_folder = ?folder.special_folder,
                    "Skipping root folder not supported by Chrome"
                );
                continue;
            };

            let mut record = dump_tree(folder, folder_record, url_record)?;
            if let Value::Object(map) = &mut record {
                map.insert("name".to_string(), Value::String(title.to_string()));
            }
            roots.insert(key.to_string(), record);
        }

        Ok(json!({ "roots": roots, "version": 1 }))
    }
}
