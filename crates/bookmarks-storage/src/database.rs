//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::{Connection, ErrorCode, OpenFlags, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::row::BookmarkRow;
use crate::schema::{create_schema, has_bookmark_table, schema_version, SCHEMA_VERSION};
use crate::{Result, StorageError};

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open an existing bookmarks database read-only.
    ///
    /// A file that is not SQLite fails with [`StorageError::NotADatabase`],
    /// one written by a newer schema with [`StorageError::UnsupportedVersion`].
    /// Files without a version (`user_version` 0) are accepted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // SQLite only reads the header on first access.
        let probe = conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        });
        match probe {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::NotADatabase => {
                return Err(StorageError::NotADatabase(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        }

        let version = schema_version(&conn)?;
        if version > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: version,
                supported: SCHEMA_VERSION,
            });
        }

        tracing::debug!(path = %path.display(), version, "Opened bookmarks database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create a new database with the bookmark schema. Never reuses an
    /// existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Err(StorageError::AlreadyExists(path.to_path_buf()));
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        create_schema(&conn)?;

        tracing::debug!(path = %path.display(), "Created bookmarks database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        create_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Insert rows in one transaction. Parents must precede their children.
    pub fn bulk_insert(&self, rows: &[BookmarkRow]) -> Result<usize> {
        let inserted = self.transaction(|conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO bookmark ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                BookmarkRow::COLUMNS
            ))?;

            for row in rows {
                stmt.execute(rusqlite::params![
                    row.id,
                    row.guid,
                    row.title,
                    row.index,
                    row.parent_id,
                    row.date_added,
                    row.date_modified,
                    row.row_type,
                    row.special_folder,
                    row.url,
                    row.icon,
                    row.icon_uri,
                    row.tags,
                ])?;
            }
            Ok(rows.len())
        })?;

        tracing::info!(rows = inserted, "Inserted bookmark rows");
        Ok(inserted)
    }

    /// The single row tagged as the root special folder.
    pub fn query_root(&self) -> Result<BookmarkRow> {
        self.with_connection(|conn| {
            if !has_bookmark_table(conn)? {
                return Err(StorageError::RootNotFound);
            }

            conn.query_row(
                &format!(
                    "SELECT {} FROM bookmark WHERE special_folder = 'root'",
                    BookmarkRow::COLUMNS
                ),
                [],
                BookmarkRow::from_row,
            )
            .optional()?
            .ok_or(StorageError::RootNotFound)
        })
    }

    /// Direct children of `parent_id`, ordered by index.
    pub fn query_children(&self, parent_id: i64) -> Result<Vec<BookmarkRow>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT {} FROM bookmark WHERE parent_id = ?1 ORDER BY \"index\", id",
                BookmarkRow::COLUMNS
            ))?;

            let rows = stmt
                .query_map([parent_id], BookmarkRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
