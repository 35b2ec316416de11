//! Typed parsed-tag tree

use bookmarks_model::guid::new_uuid;
use bookmarks_model::timestamp::seconds_to_micros;
use bookmarks_model::{Folder, Url};

use crate::{HtmlError, Result};

/// Id of the first parsed element; 1 is left for the synthesized root.
pub const FIRST_HTML_ID: i64 = 2;

/// Monotonic id source threaded through a single parse.
#[derive(Debug, Clone)]
pub struct IdCounter {
    next: i64,
}

impl IdCounter {
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new(FIRST_HTML_ID)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlNodeKind {
    Folder,
    Link,
}

/// Boolean folder attributes written by browsers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlFlags {
    /// `PERSONAL_TOOLBAR_FOLDER`
    pub toolbar: bool,
    /// `UNFILED_BOOKMARKS_FOLDER`
    pub unfiled: bool,
    /// `MOBILE_BOOKMARKS_FOLDER`
    pub mobile: bool,
}

impl HtmlFlags {
    pub fn any(&self) -> bool {
        self.toolbar || self.unfiled || self.mobile
    }
}

/// One `<H3>` folder or `<A>` link from a formatted bookmark file.
///
/// Dates are kept in seconds, exactly as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlNode {
    pub kind: HtmlNodeKind,
    pub id: i64,
    pub guid: String,
    pub title: Option<String>,
    pub add_date: Option<i64>,
    pub last_modified: Option<i64>,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub icon_uri: Option<String>,
    pub tags: Vec<String>,
    pub flags: HtmlFlags,
    pub children: Vec<HtmlNode>,
}

impl HtmlNode {
    pub fn new(kind: HtmlNodeKind, id: i64) -> Self {
        Self {
            kind,
            id,
            guid: new_uuid(),
            title: None,
            add_date: None,
            last_modified: None,
            href: None,
            icon: None,
            icon_uri: None,
            tags: Vec::new(),
            flags: HtmlFlags::default(),
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == HtmlNodeKind::Folder
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Convert into a tree folder, handing back the unconverted children.
    ///
    /// `now` (microseconds) stands in for a missing `ADD_DATE`.
    pub fn into_folder(self, index: i64, now: i64) -> (Folder, Vec<HtmlNode>) {
        let folder = Folder {
            id: self.id,
            guid: self.guid,
            index,
            title: self.title.unwrap_or_default(),
            date_added: self.add_date.map(seconds_to_micros).unwrap_or(now),
            date_modified: self.last_modified.map(seconds_to_micros).unwrap_or(0),
            special_folder: None,
            children: Vec::new(),
        };
        (folder, self.children)
    }

    /// Convert into a tree url. A link without a title is titled by its address.
    pub fn into_url(self, index: i64, now: i64) -> Result<Url> {
        let url = self.href.ok_or(HtmlError::MissingHref { id: self.id })?;

        Ok(Url {
            id: self.id,
            guid: self.guid,
            index,
            title: self.title.unwrap_or_else(|| url.clone()),
            date_added: self.add_date.map(seconds_to_micros).unwrap_or(now),
            date_modified: self.last_modified.map(seconds_to_micros).unwrap_or(0),
            url,
            icon: self.icon.unwrap_or_default(),
            icon_uri: self.icon_uri.unwrap_or_default(),
            tags: self.tags,
        })
    }
}
