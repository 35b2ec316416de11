//! Generic dialect
//!
//! The converter's own format family: Firefox-shaped HTML with a mobile
//! flag and tags, a nested JSON tree that keeps every field, and the SQLite
//! bookmark table.

use serde::Serialize;
use serde_json::Value;

use bookmarks_html::{escape_attr, escape_html, HtmlNode, HtmlNodeKind};
use bookmarks_model::guid::{ensure_uuid, new_uuid};
use bookmarks_model::{Folder, SpecialFolder, Url};
use bookmarks_storage::{BookmarkRow, Database};

use crate::codec::{finish_tree, Codec, Dialect, Format};
use crate::html::{date_attrs, read_html, write_html, HtmlDialect, HTML_ROOT_ID};
use crate::json::{
    as_object, children_field, dump_tree, int_field, load_tree, parse_object, required_int,
    required_str, str_field, tags_field, to_object, Decoded, Object,
};
use crate::{db, CodecError, Result};

pub const TOOLBAR_FLAG: &str = "PERSONAL_TOOLBAR_FOLDER";
pub const OTHER_FLAG: &str = "UNFILED_BOOKMARKS_FOLDER";
pub const MOBILE_FLAG: &str = "MOBILE_BOOKMARKS_FOLDER";

const ROOT_TITLE: &str = "root";
const MENU_TITLE: &str = "Bookmarks Menu";
const TOOLBAR_TITLE: &str = "Bookmarks Toolbar";
const OTHER_TITLE: &str = "Other Bookmarks";
const MOBILE_TITLE: &str = "Mobile Bookmarks";

pub(crate) const NETSCAPE_HEADER: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<meta http-equiv="Content-Security-Policy"
      content="default-src 'self'; script-src 'none'; img-src data: *; object-src 'none'"></meta>
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>

<DL><p>
"#;

const TYPE_FOLDER: &str = "folder";
const TYPE_URL: &str = "url";

pub fn special_title(tag: SpecialFolder) -> &'static str {
    match tag {
        SpecialFolder::Root => ROOT_TITLE,
        SpecialFolder::Menu => MENU_TITLE,
        SpecialFolder::Toolbar => TOOLBAR_TITLE,
        SpecialFolder::Other => OTHER_TITLE,
        SpecialFolder::Mobile => MOBILE_TITLE,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Generic;

impl HtmlDialect for Generic {
    const HEADER: &'static str = NETSCAPE_HEADER;
    const FOOTER: &'static str = "</DL>\n";
    const UNWRAPPED: &'static [SpecialFolder] = &[SpecialFolder::Menu];
    const SKIPPED: Option<SpecialFolder> = None;

    fn folder_line(folder: &Folder) -> String {
        let mut line = format!(
            "<DT><H3{}",
            date_attrs(folder.date_added, folder.date_modified, false)
        );

        let title = match folder.special_folder {
            Some(SpecialFolder::Toolbar) => {
                line.push_str(&format!(" {TOOLBAR_FLAG}=\"true\""));
                TOOLBAR_TITLE
            }
            Some(SpecialFolder::Other) => {
                line.push_str(&format!(" {OTHER_FLAG}=\"true\""));
                OTHER_TITLE
            }
            Some(SpecialFolder::Mobile) => {
                line.push_str(&format!(" {MOBILE_FLAG}=\"true\""));
                MOBILE_TITLE
            }
            _ => folder.title.as_str(),
        };

        line.push_str(&format!(">{}</H3>\n", escape_html(title)));
        line
    }

    fn url_line(url: &Url) -> String {
        let mut line = format!(
            "<DT><A HREF=\"{}\"{}",
            escape_attr(&url.url),
            date_attrs(url.date_added, url.date_modified, false)
        );
        if !url.icon_uri.is_empty() {
            line.push_str(&format!(" ICON_URI=\"{}\"", escape_attr(&url.icon_uri)));
        }
        if !url.icon.is_empty() {
            line.push_str(&format!(" ICON=\"{}\"", escape_attr(&url.icon)));
        }
        if !url.tags.is_empty() {
            line.push_str(&format!(" TAGS=\"{}\"", escape_attr(&url.tags.join(","))));
        }
        line.push_str(&format!(">{}</A>\n", escape_html(&url.title)));
        line
    }

    fn restructure(mut container: HtmlNode) -> HtmlNode {
        let mut root = HtmlNode::new(HtmlNodeKind::Folder, HTML_ROOT_ID);
        root.title = Some(ROOT_TITLE.to_string());

        let (hoisted, kept): (Vec<HtmlNode>, Vec<HtmlNode>) =
            std::mem::take(&mut container.children)
                .into_iter()
                .partition(|child| child.is_folder() && child.flags.any());
        container.children = kept;

        root.children.push(container);
        root.children.extend(hoisted);
        root
    }

    fn special_folder(node: &HtmlNode) -> Option<SpecialFolder> {
        let title = node.title();
        if title == MENU_TITLE {
            Some(SpecialFolder::Menu)
        } else if node.flags.toolbar || title == TOOLBAR_TITLE {
            Some(SpecialFolder::Toolbar)
        } else if node.flags.unfiled || title == OTHER_TITLE {
            Some(SpecialFolder::Other)
        } else if node.flags.mobile || title == MOBILE_TITLE {
            Some(SpecialFolder::Mobile)
        } else {
            None
        }
    }

    fn canonical_title(tag: SpecialFolder) -> Option<&'static str> {
        Some(special_title(tag))
    }
}

#[derive(Serialize)]
struct FolderRecord<'a> {
    id: i64,
    guid: String,
    index: i64,
    title: &'a str,
    date_added: i64,
    date_modified: i64,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    special_folder: Option<SpecialFolder>,
    children: [(); 0],
}

#[derive(Serialize)]
struct UrlRecord<'a> {
    id: i64,
    guid: String,
    index: i64,
    title: &'a str,
    date_added: i64,
    date_modified: i64,
    url: &'a str,
    icon: &'a str,
    iconuri: &'a str,
    tags: &'a [String],
    #[serde(rename = "type")]
    kind: &'static str,
}

fn folder_record(folder: &Folder) -> Result<Object> {
    to_object(&FolderRecord {
        id: folder.id,
        guid: ensure_uuid(&folder.guid),
        index: folder.index,
        title: folder
            .special_folder
            .map(special_title)
            .unwrap_or(folder.title.as_str()),
        date_added: folder.date_added,
        date_modified: folder.date_modified,
        kind: TYPE_FOLDER,
        special_folder: folder.special_folder,
        children: [],
    })
}

fn url_record(url: &Url) -> Result<Object> {
    to_object(&UrlRecord {
        id: url.id,
        guid: ensure_uuid(&url.guid),
        index: url.index,
        title: &url.title,
        date_added: url.date_added,
        date_modified: url.date_modified,
        url: &url.url,
        icon: &url.icon,
        iconuri: &url.icon_uri,
        tags: &url.tags,
        kind: TYPE_URL,
    })
}

/// Fields shared by folder and url records.
struct Common {
    id: i64,
    guid: String,
    index: i64,
    title: Option<String>,
    date_added: i64,
    date_modified: i64,
}

/// `index` is required but position wins once the tree is assembled.
fn decode_common(obj: &Object) -> Result<Common> {
    Ok(Common {
        id: required_int(obj, "id")?,
        guid: str_field(obj, "guid")?
            .map(|guid| ensure_uuid(&guid))
            .unwrap_or_else(new_uuid),
        index: required_int(obj, "index")?,
        title: str_field(obj, "title")?,
        date_added: int_field(obj, "date_added")?.unwrap_or(0),
        date_modified: int_field(obj, "date_modified")?.unwrap_or(0),
    })
}

fn decode_folder(obj: &Object) -> Result<Folder> {
    let Common {
        id,
        guid,
        index,
        title,
        date_added,
        date_modified,
    } = decode_common(obj)?;

    let special_folder = match str_field(obj, "special_folder")? {
        Some(name) if !name.is_empty() => Some(name.parse::<SpecialFolder>()?),
        _ => None,
    };
    let title = match special_folder {
        Some(tag) => special_title(tag).to_string(),
        None => title.unwrap_or_default(),
    };

    Ok(Folder {
        id,
        guid,
        index,
        title,
        date_added,
        date_modified,
        special_folder,
        children: Vec::new(),
    })
}

fn decode_url(obj: &Object) -> Result<Url> {
    let Common {
        id,
        guid,
        index,
        title,
        date_added,
        date_modified,
    } = decode_common(obj)?;
    let url = required_str(obj, "url")?;

    Ok(Url {
        id,
        guid,
        index,
        title: title.unwrap_or_else(|| url.clone()),
        date_added,
        date_modified,
        icon: str_field(obj, "icon")?.unwrap_or_default(),
        icon_uri: str_field(obj, "iconuri")?.unwrap_or_default(),
        tags: tags_field(obj, "tags")?,
        url,
    })
}

fn decode_node(value: &Value) -> Result<Decoded<'_>> {
    let obj = as_object(value, "children")?;
    match required_str(obj, "type")?.as_str() {
        TYPE_FOLDER => Ok(Decoded::Folder(decode_folder(obj)?, children_field(obj)?)),
        TYPE_URL => Ok(Decoded::Url(decode_url(obj)?)),
        other => Err(CodecError::UnsupportedType(other.to_string())),
    }
}

impl Codec for Generic {
    fn dialect(&self) -> Dialect {
        Dialect::Generic
    }

    fn formats(&self) -> &'static [Format] {
        &[Format::Db, Format::Html, Format::Json]
    }

    fn from_html(&self, html: &str) -> Result<Folder> {
        read_html::<Self>(html)
    }

    fn as_html(&self, tree: &Folder) -> Result<String> {
        Ok(write_html::<Self>(tree))
    }

    fn from_json(&self, json: &str) -> Result<Folder> {
        let document = parse_object(json)?;
        let (root, children) = match decode_node(&document)? {
            Decoded::Folder(root, children) => (root, children),
            _ => return Err(CodecError::RootNotFolder),
        };
        Ok(finish_tree(load_tree(root, children, decode_node)?))
    }

    fn as_json(&self, tree: &Folder) -> Result<Value> {
        dump_tree(tree, folder_record, url_record)
    }

    fn from_db(&self, db: &Database) -> Result<Folder> {
        Ok(finish_tree(db::load_rows(db)?))
    }

    fn as_db(&self, tree: &Folder) -> Result<Vec<BookmarkRow>> {
        Ok(db::flatten(tree))
    }
}
