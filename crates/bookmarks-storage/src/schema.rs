//! Bookmark table schema
//!
//! The version lives in `PRAGMA user_version` so exported files hold the
//! `bookmark` table and nothing else.

use crate::Result;
use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 1;

pub fn create_schema(conn: &Connection) -> Result<()> {
    tracing::debug!(version = SCHEMA_VERSION, "Creating bookmark schema");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS bookmark (
            id INTEGER NOT NULL PRIMARY KEY,
            guid VARCHAR,
            title VARCHAR,
            "index" INTEGER,
            parent_id INTEGER REFERENCES bookmark (id),
            date_added INTEGER NOT NULL,
            date_modified INTEGER,
            type VARCHAR,
            special_folder VARCHAR UNIQUE,
            url VARCHAR,
            icon VARCHAR,
            icon_uri VARCHAR,
            tags VARCHAR
        );

        CREATE INDEX IF NOT EXISTS idx_bookmark_parent ON bookmark(parent_id, "index");
    "#,
    )?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

pub fn schema_version(conn: &Connection) -> Result<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Whether the `bookmark` table exists.
pub fn has_bookmark_table(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'bookmark'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_schema_sets_version() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!has_bookmark_table(&conn).unwrap());
        assert_eq!(schema_version(&conn).unwrap(), 0);

        create_schema(&conn).unwrap();
        assert!(has_bookmark_table(&conn).unwrap());
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_special_folder_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO bookmark (id, date_added, special_folder) VALUES (1, 0, 'root')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO bookmark (id, date_added, special_folder) VALUES (2, 0, 'root')",
            [],
        );
        assert!(dup.is_err());
    }
}
