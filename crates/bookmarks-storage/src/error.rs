//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{} is not a valid sqlite3 database file", .0.display())]
    NotADatabase(PathBuf),

    #[error("Refusing to overwrite existing database: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Database schema version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: i32, supported: i32 },

    #[error("No root folder found in database")]
    RootNotFound,
}
