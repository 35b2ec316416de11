//! Bookmark tree <-> `bookmark` table rows

use bookmarks_model::{Bookmark, Folder, SpecialFolder, Url};
use bookmarks_storage::{BookmarkRow, Database, TYPE_FOLDER, TYPE_URL};

use crate::json::split_tags;
use crate::{CodecError, Result};

fn folder_row(folder: &Folder, parent_id: Option<i64>) -> BookmarkRow {
    BookmarkRow {
        id: folder.id,
        guid: folder.guid.clone(),
        title: folder.title.clone(),
        index: folder.index,
        parent_id,
        date_added: folder.date_added,
        date_modified: folder.date_modified,
        row_type: TYPE_FOLDER.to_string(),
        special_folder: folder.special_folder.map(|tag| tag.as_str().to_string()),
        ..Default::default()
    }
}

fn url_row(url: &Url, parent_id: i64) -> BookmarkRow {
    BookmarkRow {
        id: url.id,
        guid: url.guid.clone(),
        title: url.title.clone(),
        index: url.index,
        parent_id: Some(parent_id),
        date_added: url.date_added,
        date_modified: url.date_modified,
        row_type: TYPE_URL.to_string(),
        special_folder: None,
        url: Some(url.url.clone()),
        icon: Some(url.icon.clone()),
        icon_uri: Some(url.icon_uri.clone()),
        tags: Some(url.tags.join(",")),
    }
}

/// Pre-order rows; every parent precedes its children.
pub(crate) fn flatten(tree: &Folder) -> Vec<BookmarkRow> {
    let mut rows = vec![folder_row(tree, None)];
    let mut stack: Vec<(i64, &Bookmark)> = tree.iter().rev().map(|child| (tree.id, child)).collect();

    while let Some((parent_id, node)) = stack.pop() {
        match node {
            Bookmark::Folder(folder) => {
                rows.push(folder_row(folder, Some(parent_id)));
                stack.extend(folder.iter().rev().map(|child| (folder.id, child)));
            }
            Bookmark::Url(url) => rows.push(url_row(url, parent_id)),
        }
    }

    tracing::debug!(rows = rows.len(), "Flattened bookmark tree");
    rows
}

fn row_folder(row: BookmarkRow) -> Result<Folder> {
    let special_folder = match row.special_folder.as_deref() {
        Some("") | None => None,
        Some(name) => Some(name.parse::<SpecialFolder>()?),
    };

    Ok(Folder {
        id: row.id,
        guid: row.guid,
        index: row.index,
        title: row.title,
        date_added: row.date_added,
        date_modified: row.date_modified,
        special_folder,
        children: Vec::new(),
    })
}

fn row_url(row: BookmarkRow) -> Result<Url> {
    let url = row
        .url
        .ok_or_else(|| CodecError::MissingField("url".to_string()))?;

    Ok(Url {
        id: row.id,
        guid: row.guid,
        index: row.index,
        title: row.title,
        date_added: row.date_added,
        date_modified: row.date_modified,
        url,
        icon: row.icon.unwrap_or_default(),
        icon_uri: row.icon_uri.unwrap_or_default(),
        tags: row.tags.as_deref().map(split_tags).unwrap_or_default(),
    })
}

/// Rebuild the tree below the root row, one children query per folder.
pub(crate) fn load_rows(db: &Database) -> Result<Folder> {
    let root = db.query_root()?;
    if !root.is_folder() {
        return Err(CodecError::RootNotFolder);
    }

    let children = db.query_children(root.id)?;
    let mut current = (row_folder(root)?, children.into_iter());
    let mut parents = Vec::new();

    loop {
        match current.1.next() {
            Some(row) if row.row_type == TYPE_FOLDER => {
                let children = db.query_children(row.id)?;
                let child = (row_folder(row)?, children.into_iter());
                parents.push(std::mem::replace(&mut current, child));
            }
            Some(row) if row.row_type == TYPE_URL => current.0.children.push(row_url(row)?.into()),
            Some(row) => return Err(CodecError::UnsupportedType(row.row_type)),
            None => match parents.pop() {
                Some(parent) => {
                    let (done, _) = std::mem::replace(&mut current, parent);
                    current.0.children.push(done.into());
                }
                None => return Ok(current.0),
            },
        }
    }
}
