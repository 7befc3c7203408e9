//! v001 -- Initial schema creation.
//!
//! Creates the single `kv` table holding the persisted client state under
//! stable keys (`access_token`, `refresh_token`, `user`, `language`).

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Key-value store
--
-- One row per persisted client-state key.  The `user` value is the
-- cached profile record serialized as JSON; the rest are plain text.
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
