//! Bookmark tree data structures

use serde::{Deserialize, Serialize};

use crate::special::SpecialFolder;

/// A folder owning an ordered, heterogeneous list of children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub guid: String,
    /// Position among siblings
    pub index: i64,
    pub title: String,
    /// Microseconds since the Unix epoch
    pub date_added: i64,
    /// Microseconds since the Unix epoch, zero when never modified
    pub date_modified: i64,
    pub special_folder: Option<SpecialFolder>,
    pub children: Vec<Bookmark>,
}

/// A link to an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub id: i64,
    pub guid: String,
    pub index: i64,
    pub title: String,
    pub date_added: i64,
    pub date_modified: i64,
    pub url: String,
    /// Inline icon data, usually a `data:` URI
    pub icon: String,
    /// Address the icon was fetched from
    pub icon_uri: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Bookmark {
    Folder(Folder),
    Url(Url),
}

impl Bookmark {
    pub fn id(&self) -> i64 {
        match self {
            Bookmark::Folder(f) => f.id,
            Bookmark::Url(u) => u.id,
        }
    }

    pub fn guid(&self) -> &str {
        match self {
            Bookmark::Folder(f) => &f.guid,
            Bookmark::Url(u) => &u.guid,
        }
    }

    pub fn index(&self) -> i64 {
        match self {
            Bookmark::Folder(f) => f.index,
            Bookmark::Url(u) => u.index,
        }
    }

    pub fn set_index(&mut self, index: i64) {
        match self {
            Bookmark::Folder(f) => f.index = index,
            Bookmark::Url(u) => u.index = index,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Bookmark::Folder(f) => &f.title,
            Bookmark::Url(u) => &u.title,
        }
    }

    pub fn date_added(&self) -> i64 {
        match self {
            Bookmark::Folder(f) => f.date_added,
            Bookmark::Url(u) => u.date_added,
        }
    }

    pub fn date_modified(&self) -> i64 {
        match self {
            Bookmark::Folder(f) => f.date_modified,
            Bookmark::Url(u) => u.date_modified,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Bookmark::Folder(f) => Some(f),
            Bookmark::Url(_) => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Bookmark::Url(u) => Some(u),
            Bookmark::Folder(_) => None,
        }
    }

    pub fn special_folder(&self) -> Option<SpecialFolder> {
        self.as_folder().and_then(|f| f.special_folder)
    }

    /// Structural equality that ignores guids and ids.
    ///
    /// Parsers fabricate guids and renumber ids for formats that lack them,
    /// so round-trip comparisons only look at the business fields.
    pub fn same_content(&self, other: &Bookmark) -> bool {
        same_pairs(vec![(self, other)])
    }
}

fn folder_fields_eq(a: &Folder, b: &Folder) -> bool {
    a.index == b.index
        && a.title == b.title
        && a.date_added == b.date_added
        && a.date_modified == b.date_modified
        && a.special_folder == b.special_folder
        && a.children.len() == b.children.len()
}

fn url_fields_eq(a: &Url, b: &Url) -> bool {
    a.index == b.index
        && a.title == b.title
        && a.date_added == b.date_added
        && a.date_modified == b.date_modified
        && a.url == b.url
        && a.icon == b.icon
        && a.icon_uri == b.icon_uri
        && a.tags == b.tags
}

fn same_pairs<'a>(mut stack: Vec<(&'a Bookmark, &'a Bookmark)>) -> bool {
    while let Some(pair) = stack.pop() {
        match pair {
            (Bookmark::Folder(a), Bookmark::Folder(b)) => {
                if !folder_fields_eq(a, b) {
                    return false;
                }
                stack.extend(a.children.iter().zip(b.children.iter()));
            }
            (Bookmark::Url(a), Bookmark::Url(b)) => {
                if !url_fields_eq(a, b) {
                    return false;
                }
            }
            _ => return false,
        }
    }
    true
}

impl From<Folder> for Bookmark {
    fn from(folder: Folder) -> Self {
        Bookmark::Folder(folder)
    }
}

impl From<Url> for Bookmark {
    fn from(url: Url) -> Self {
        Bookmark::Url(url)
    }
}

impl Folder {
    /// Iterate over the direct children.
    pub fn iter(&self) -> std::slice::Iter<'_, Bookmark> {
        self.children.iter()
    }

    /// Pre-order traversal over every descendant (not including `self`).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Number of descendants, folders and urls alike.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct child folder carrying the given special tag.
    pub fn special_child(&self, tag: SpecialFolder) -> Option<&Folder> {
        self.iter()
            .filter_map(Bookmark::as_folder)
            .find(|f| f.special_folder == Some(tag))
    }

    /// Rewrite every `index` in the subtree to match list position.
    pub fn reindex(&mut self) {
        let mut stack: Vec<&mut Folder> = vec![self];

        while let Some(folder) = stack.pop() {
            for (i, child) in folder.children.iter_mut().enumerate() {
                child.set_index(i as i64);
                if let Bookmark::Folder(f) = child {
                    stack.push(f);
                }
            }
        }
    }

    /// See [`Bookmark::same_content`].
    pub fn same_content(&self, other: &Folder) -> bool {
        folder_fields_eq(self, other)
            && same_pairs(self.children.iter().zip(other.children.iter()).collect())
    }
}

impl<'a> IntoIterator for &'a Folder {
    type Item = &'a Bookmark;
    type IntoIter = std::slice::Iter<'a, Bookmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterative pre-order walk, see [`Folder::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Bookmark>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Bookmark;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Bookmark::Folder(folder) = node {
            self.stack.extend(folder.children.iter().rev());
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(id: i64, index: i64, title: &str) -> Bookmark {
        Url {
            id,
            index,
            title: title.to_string(),
            url: format!("https://example.com/{id}"),
            ..Default::default()
        }
        .into()
    }

    fn sample() -> Folder {
        Folder {
            id: 1,
            title: "root".to_string(),
            special_folder: Some(SpecialFolder::Root),
            children: vec![
                Folder {
                    id: 2,
                    index: 0,
                    title: "Bookmarks Menu".to_string(),
                    special_folder: Some(SpecialFolder::Menu),
                    children: vec![url(3, 0, "a"), url(4, 1, "b")],
                    ..Default::default()
                }
                .into(),
                Folder {
                    id: 5,
                    index: 1,
                    title: "Bookmarks Toolbar".to_string(),
                    special_folder: Some(SpecialFolder::Toolbar),
                    children: vec![url(6, 0, "c")],
                    ..Default::default()
                }
                .into(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample();
        let ids: Vec<i64> = tree.walk().map(Bookmark::id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_reindex_matches_position() {
        let mut tree = sample();
        if let Bookmark::Folder(menu) = &mut tree.children[0] {
            menu.children.reverse();
        }
        tree.reindex();

        let menu = tree.special_child(SpecialFolder::Menu).unwrap();
        for (i, child) in menu.iter().enumerate() {
            assert_eq!(child.index(), i as i64);
        }
        assert_eq!(menu.children[0].title(), "b");
    }

    #[test]
    fn test_same_content_ignores_guid_and_id() {
        let a = sample();
        let mut b = sample();
        b.guid = "something-else".to_string();
        if let Bookmark::Folder(menu) = &mut b.children[0] {
            menu.id = 99;
            menu.guid = "fresh".to_string();
        }
        assert_ne!(a, b);
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_same_content_detects_title_change() {
        let a = sample();
        let mut b = sample();
        if let Bookmark::Folder(toolbar) = &mut b.children[1] {
            if let Bookmark::Url(u) = &mut toolbar.children[0] {
                u.title = "changed".to_string();
            }
        }
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_special_child_lookup() {
        let tree = sample();
        assert_eq!(tree.special_child(SpecialFolder::Toolbar).unwrap().id, 5);
        assert!(tree.special_child(SpecialFolder::Mobile).is_none());
    }
}
