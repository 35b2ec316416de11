//! Flattened bookmark rows

use rusqlite::Row;

pub const TYPE_FOLDER: &str = "folder";
pub const TYPE_URL: &str = "url";

/// One row of the `bookmark` table.
///
/// Url-only columns are `None` for folders. `parent_id` is `None` for the
/// root only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkRow {
    pub id: i64,
    pub guid: String,
    pub title: String,
    pub index: i64,
    pub parent_id: Option<i64>,
    pub date_added: i64,
    pub date_modified: i64,
    pub row_type: String,
    pub special_folder: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub icon_uri: Option<String>,
    /// Comma separated
    pub tags: Option<String>,
}

impl BookmarkRow {
    pub(crate) const COLUMNS: &'static str = "id, guid, title, \"index\", parent_id, date_added, \
         date_modified, type, special_folder, url, icon, icon_uri, tags";

    pub fn is_folder(&self) -> bool {
        self.row_type == TYPE_FOLDER
    }

    /// Map a row selected with [`Self::COLUMNS`]. Nullable text reads as empty.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            guid: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            index: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
            parent_id: row.get(4)?,
            date_added: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
            date_modified: row.get::<_, Option<i64>>(6)?.unwrap_or_default(),
            row_type: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            special_folder: row.get(8)?,
            url: row.get(9)?,
            icon: row.get(10)?,
            icon_uri: row.get(11)?,
            tags: row.get(12)?,
        })
    }
}
