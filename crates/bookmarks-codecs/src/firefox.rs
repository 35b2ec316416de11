//! Firefox dialect
//!
//! HTML follows Firefox's "Export Bookmarks to HTML" output: the menu is the
//! top-level list and the toolbar and unfiled folders are flagged inside it.
//! JSON follows the "Backup" file: `text/x-moz-place*` types, camel-case
//! dates in microseconds and 12 character guids.

use serde::Serialize;
use serde_json::Value;

use bookmarks_html::{escape_attr, escape_html, HtmlNode, HtmlNodeKind};
use bookmarks_model::guid::{ensure_mozilla_guid, new_mozilla_guid};
use bookmarks_model::{Folder, SpecialFolder, Url};

use crate::codec::{finish_tree, Codec, Dialect, Format};
use crate::generic::{NETSCAPE_HEADER, OTHER_FLAG, TOOLBAR_FLAG};
use crate::html::{date_attrs, read_html, write_html, HtmlDialect, HTML_ROOT_ID};
use crate::json::{
    as_object, children_field, dump_tree, int_field, load_tree, parse_object, required_int,
    required_str, str_field, tags_field, to_object, Decoded, Object,
};
use crate::{CodecError, Result};

const MENU_TITLE: &str = "Bookmarks Menu";
const TOOLBAR_TITLE: &str = "Bookmarks Toolbar";
const OTHER_TITLE: &str = "Other Bookmarks";

pub const PLACE_TYPE: &str = "text/x-moz-place";
pub const CONTAINER_TYPE: &str = "text/x-moz-place-container";
pub const SEPARATOR_TYPE: &str = "text/x-moz-place-separator";

const TYPE_CODE_URL: i64 = 1;
const TYPE_CODE_FOLDER: i64 = 2;

/// `root` name, canonical guid and JSON title of each special folder.
fn json_root(tag: SpecialFolder) -> (&'static str, &'static str, &'static str) {
    match tag {
        SpecialFolder::Root => ("placesRoot", "root________", ""),
        SpecialFolder::Menu => ("bookmarksMenuFolder", "menu________", "menu"),
        SpecialFolder::Toolbar => ("toolbarFolder", "toolbar_____", "toolbar"),
        SpecialFolder::Other => ("unfiledBookmarksFolder", "unfiled_____", "unfiled"),
        SpecialFolder::Mobile => ("mobileFolder", "mobile______", "mobile"),
    }
}

fn parse_root(name: &str) -> Result<SpecialFolder> {
    SpecialFolder::ALL
        .into_iter()
        .find(|tag| json_root(*tag).0 == name)
        .ok_or_else(|| CodecError::InvalidField {
            field: "root".to_string(),
            value: name.to_string(),
        })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Firefox;

impl HtmlDialect for Firefox {
    const HEADER: &'static str = NETSCAPE_HEADER;
    const FOOTER: &'static str = "</DL>\n";
    const UNWRAPPED: &'static [SpecialFolder] = &[SpecialFolder::Menu];
    // Firefox leaves mobile bookmarks out of its HTML export.
    const SKIPPED: Option<SpecialFolder> = Some(SpecialFolder::Mobile);

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
        line.push_str(&format!(">{}</A>\n", escape_html(&url.title)));
        line
    }

    fn restructure(mut container: HtmlNode) -> HtmlNode {
        let mut root = HtmlNode::new(HtmlNodeKind::Folder, HTML_ROOT_ID);
        root.title = Some(String::new());

        let (hoisted, kept): (Vec<HtmlNode>, Vec<HtmlNode>) =
            std::mem::take(&mut container.children)
                .into_iter()
                .partition(|child| child.is_folder() && (child.flags.toolbar || child.flags.unfiled));
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
        } else {
            None
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FolderRecord<'a> {
    guid: String,
    title: &'a str,
    index: i64,
    date_added: i64,
    last_modified: i64,
    id: i64,
    type_code: i64,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<&'static str>,
    children: [(); 0],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UrlRecord<'a> {
    guid: String,
    title: &'a str,
    index: i64,
    date_added: i64,
    last_modified: i64,
    id: i64,
    type_code: i64,
    #[serde(rename = "iconuri", skip_serializing_if = "str::is_empty")]
    icon_uri: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    uri: &'a str,
}

fn folder_record(folder: &Folder) -> Result<Object> {
    let (root, guid, title) = match folder.special_folder.map(json_root) {
        Some((root, guid, title)) => (Some(root), guid.to_string(), title),
        None => (None, ensure_mozilla_guid(&folder.guid), folder.title.as_str()),
    };

    to_object(&FolderRecord {
        guid,
        title,
        index: folder.index,
        date_added: folder.date_added,
        last_modified: folder.date_modified,
        id: folder.id,
        type_code: TYPE_CODE_FOLDER,
        kind: CONTAINER_TYPE,
        root,
        children: [],
    })
}

fn url_record(url: &Url) -> Result<Object> {
    to_object(&UrlRecord {
        guid: ensure_mozilla_guid(&url.guid),
        title: &url.title,
        index: url.index,
        date_added: url.date_added,
        last_modified: url.date_modified,
        id: url.id,
        type_code: TYPE_CODE_URL,
        icon_uri: &url.icon_uri,
        kind: PLACE_TYPE,
        uri: &url.url,
    })
}

fn decode_node(value: &Value) -> Result<Decoded<'_>> {
    let obj = as_object(value, "children")?;
    let kind = required_str(obj, "type")?;
    if kind == SEPARATOR_TYPE {
        return Ok(Decoded::Skip);
    }

    // `index` is optional here; positions are reassigned after loading.
    let id = required_int(obj, "id")?;
    let index = int_field(obj, "index")?.unwrap_or(0);
    let guid = str_field(obj, "guid")?
        .map(|guid| ensure_mozilla_guid(&guid))
        .unwrap_or_else(new_mozilla_guid);
    let title = str_field(obj, "title")?;
    let date_added = int_field(obj, "dateAdded")?.unwrap_or(0);
    let date_modified = int_field(obj, "lastModified")?.unwrap_or(0);

    match kind.as_str() {
        CONTAINER_TYPE => {
            let special_folder = match str_field(obj, "root")? {
                Some(name) if !name.is_empty() => Some(parse_root(&name)?),
                _ => None,
            };
            Ok(Decoded::Folder(
                Folder {
                    id,
                    guid,
                    index,
                    title: title.unwrap_or_default(),
                    date_added,
                    date_modified,
                    special_folder,
                    children: Vec::new(),
                },
                children_field(obj)?,
            ))
        }
        PLACE_TYPE => {
            let url = required_str(obj, "uri")?;
            Ok(Decoded::Url(Url {
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
            }))
        }
        other => Err(CodecError::UnsupportedType(other.to_string())),
    }
}

impl Codec for Firefox {
    fn dialect(&self) -> Dialect {
        Dialect::Firefox
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
        let (root, children) = match decode_node(&document)? {
            Decoded::Folder(root, children) => (root, children),
            _ => return Err(CodecError::RootNotFolder),
        };
        Ok(finish_tree(load_tree(root, children, decode_node)?))
    }

    fn as_json(&self, tree: &Folder) -> Result<Value> {
        dump_tree(tree, folder_record, url_record)
    }
}
