//! Dialect / format capability matrix and the codec trait

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use bookmarks_model::{Bookmark, Folder, SpecialFolder};
use bookmarks_storage::{BookmarkRow, Database};

use crate::chrome::Chrome;
use crate::firefox::Firefox;
use crate::generic::Generic;
use crate::{CodecError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Db,
    Html,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Db, Format::Html, Format::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Db => "db",
            Format::Html => "html",
            Format::Json => "json",
        }
    }

    /// File extension used for generated output names.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "db" => Ok(Format::Db),
            "html" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            _ => Err(CodecError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    Chrome,
    Firefox,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Generic, Dialect::Chrome, Dialect::Firefox];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::Chrome => "chrome",
            Dialect::Firefox => "firefox",
        }
    }

    pub fn codec(&self) -> &'static dyn Codec {
        match self {
            Dialect::Generic => &Generic,
            Dialect::Chrome => &Chrome,
            Dialect::Firefox => &Firefox,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "bookmarkie" => Ok(Dialect::Generic),
            "chrome" => Ok(Dialect::Chrome),
            "firefox" => Ok(Dialect::Firefox),
            _ => Err(CodecError::UnknownDialect(s.to_string())),
        }
    }
}

/// Load and save operations of one dialect.
///
/// Every dialect reads and writes HTML and JSON; the default methods report
/// the remaining combinations as [`CodecError::Unsupported`].
pub trait Codec: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn formats(&self) -> &'static [Format];

    fn supports(&self, format: Format) -> bool {
        self.formats().contains(&format)
    }

    fn unsupported(&self, format: Format) -> CodecError {
        CodecError::Unsupported {
            dialect: self.dialect(),
            format,
        }
    }

    fn from_html(&self, html: &str) -> Result<Folder>;

    fn as_html(&self, tree: &Folder) -> Result<String>;

    fn from_json(&self, json: &str) -> Result<Folder>;

    fn as_json(&self, tree: &Folder) -> Result<Value>;

    fn from_db(&self, _db: &Database) -> Result<Folder> {
        Err(self.unsupported(Format::Db))
    }

    fn as_db(&self, _tree: &Folder) -> Result<Vec<BookmarkRow>> {
        Err(self.unsupported(Format::Db))
    }
}

/// Final pass shared by every loader.
///
/// Tags the top folder as root, keeps the first folder per special tag
/// (root children win) and rewrites sibling indices to list position.
pub(crate) fn finish_tree(mut root: Folder) -> Folder {
    root.special_folder = Some(SpecialFolder::Root);

    let mut seen = HashSet::from([SpecialFolder::Root]);
    let mut stack: Vec<&mut Folder> = vec![&mut root];

    while let Some(folder) = stack.pop() {
        for child in folder.children.iter_mut() {
            let Bookmark::Folder(child) = child else {
                continue;
            };
            if let Some(tag) = child.special_folder {
                if !seen.insert(tag) {
                    tracing::warn!(
                        special_folder = %tag,
                        title = %child.title,
                        "Dropping duplicate special folder tag"
                    );
                    child.special_folder = None;
                }
            }
            stack.push(child);
        }
    }

    root.reindex();
    tracing::debug!(nodes = root.len(), "Loaded bookmark tree");
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(id: i64, tag: Option<SpecialFolder>, children: Vec<Bookmark>) -> Bookmark {
        Folder {
            id,
            index: 9,
            special_folder: tag,
            children,
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("bookmarkie".parse::<Dialect>().unwrap(), Dialect::Generic);
        assert!(matches!(
            "opera".parse::<Dialect>(),
            Err(CodecError::UnknownDialect(_))
        ));
        assert!(matches!(
            "xml".parse::<Format>(),
            Err(CodecError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_capabilities() {
        assert_eq!(Dialect::Generic.codec().formats(), &Format::ALL);
        assert!(!Dialect::Chrome.codec().supports(Format::Db));
        assert!(!Dialect::Firefox.codec().supports(Format::Db));
        assert!(Dialect::Firefox.codec().supports(Format::Html));
        for dialect in Dialect::ALL {
            assert_eq!(dialect.codec().dialect(), dialect);
        }
    }

    #[test]
    fn test_unsupported_db() {
        let err = Dialect::Chrome
            .codec()
            .as_db(&Folder::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "The chrome dialect does not support the db format"
        );
    }

    #[test]
    fn test_finish_tree_dedupes_and_reindexes() {
        let root = Folder {
            children: vec![
                tagged(2, Some(SpecialFolder::Toolbar), vec![tagged(5, Some(SpecialFolder::Toolbar), vec![])]),
                tagged(3, Some(SpecialFolder::Toolbar), vec![]),
                tagged(4, Some(SpecialFolder::Root), vec![]),
            ],
            ..Default::default()
        };

        let root = finish_tree(root);
        assert_eq!(root.special_folder, Some(SpecialFolder::Root));

        let tags: Vec<_> = root.iter().map(Bookmark::special_folder).collect();
        assert_eq!(tags, vec![Some(SpecialFolder::Toolbar), None, None]);
        assert_eq!(root.children[0].as_folder().unwrap().children[0].special_folder(), None);

        let indices: Vec<i64> = root.iter().map(Bookmark::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
