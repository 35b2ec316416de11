//! Bookmarks Storage Layer
//!
//! A single self-referencing `bookmark` table holding folders and urls,
//! discriminated by `type` and ordered by `"index"` within a parent.
//! Exports always go to a freshly created database file.

mod database;
mod error;
mod row;
mod schema;

pub use database::Database;
pub use error::StorageError;
pub use row::{BookmarkRow, TYPE_FOLDER, TYPE_URL};
pub use schema::SCHEMA_VERSION;

pub type Result<T> = std::result::Result<T, StorageError>;
