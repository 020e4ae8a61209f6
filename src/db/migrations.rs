//! Database migrations
//!
//! Schema creation for the settings store.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: user settings (single row, id = 1)
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE user_settings (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            gender TEXT NOT NULL DEFAULT 'other',
            weight_kg REAL NOT NULL,
            measure_system TEXT NOT NULL DEFAULT 'metric',
            sip_size TEXT NOT NULL DEFAULT 'FullCup',
            drink_amount_ml INTEGER NOT NULL,
            next_break_duration_minutes INTEGER NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,              -- boolean
            enable_on_startup INTEGER NOT NULL DEFAULT 1,   -- boolean
            allow_tracking INTEGER NOT NULL DEFAULT 1,      -- boolean
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    Ok(())
}

/// Highest applied migration; 0 when none has run
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_empty_migration_table_is_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT)",
            [],
        )
        .unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_schema_version_query_errors_propagate() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(get_schema_version(&conn).is_err());
    }
}
