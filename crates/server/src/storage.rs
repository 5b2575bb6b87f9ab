use anyhow::{Context, Result};
use rusqlite::{Connection, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use staffhub_api::db::{self, migrations::MIGRATIONS};
use staffhub_api::{
    BankAccountResponse, CalendarEventResponse, DocumentResponse, EmployeeResponse,
    EmployeeStatus, EventType, GoalResponse, GoalStatus, NotificationResponse,
};

/// Shared database state, constructed once in `main` and injected through
/// axum state.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
    data_dir: PathBuf,
}

impl Db {
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Path to the uploaded-document storage directory.
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Write uploaded file bytes to disk, return the storage filename.
    pub fn write_upload(&self, stored_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.uploads_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(stored_name);
        std::fs::write(&path, bytes).context("writing uploaded file")?;
        Ok(path)
    }

    /// Best-effort removal of a stored upload.
    pub fn remove_upload(&self, stored_name: &str) {
        let path = self.uploads_dir().join(stored_name);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("failed to remove upload {}: {e}", path.display());
        }
    }
}

/// Initialize the database: open connection, enable WAL, run migrations.
pub fn init_db(data_dir: &Path) -> Result<Db> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("staffhub.db");
    let conn = Connection::open(&db_path).context("opening SQLite database")?;

    // WAL for better concurrent read performance
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    run_migrations(&conn)?;

    Ok(Db {
        conn: Arc::new(Mutex::new(conn)),
        data_dir: data_dir.to_path_buf(),
    })
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !already_applied {
            conn.execute_batch(sql)
                .with_context(|| format!("running migration {name}"))?;
            conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])?;
            tracing::info!("Applied migration: {name}");
        }
    }

    Ok(())
}

// ── sea-query → rusqlite bridging ──────────────────────────────────────────

fn sq_value(value: &sea_query::Value) -> rusqlite::types::Value {
    use rusqlite::types::Value as Sql;
    use sea_query::Value as Sq;
    match value {
        Sq::Bool(v) => v.map(|b| Sql::Integer(b as i64)).unwrap_or(Sql::Null),
        Sq::TinyInt(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::SmallInt(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::Int(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::BigInt(v) => v.map(Sql::Integer).unwrap_or(Sql::Null),
        Sq::TinyUnsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::SmallUnsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::Unsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::BigUnsigned(v) => v
            .map(|n| Sql::Integer(i64::try_from(n).unwrap_or(i64::MAX)))
            .unwrap_or(Sql::Null),
        Sq::Float(v) => v.map(|n| Sql::Real(n as f64)).unwrap_or(Sql::Null),
        Sq::Double(v) => v.map(Sql::Real).unwrap_or(Sql::Null),
        Sq::String(v) => v
            .as_ref()
            .map(|s| Sql::Text(s.as_ref().clone()))
            .unwrap_or(Sql::Null),
        Sq::Bytes(v) => v
            .as_ref()
            .map(|b| Sql::Blob(b.as_ref().clone()))
            .unwrap_or(Sql::Null),
        _ => Sql::Null,
    }
}

fn sq_params(values: &sea_query::Values) -> Vec<rusqlite::types::Value> {
    values.0.iter().map(sq_value).collect()
}

/// Execute a built statement, returning the affected row count.
pub fn sq_execute(conn: &Connection, (sql, values): db::Built) -> rusqlite::Result<usize> {
    conn.execute(&sql, rusqlite::params_from_iter(sq_params(&values)))
}

/// Run a built SELECT expected to produce one row.
pub fn sq_query_row<T>(
    conn: &Connection,
    (sql, values): db::Built,
    f: impl FnOnce(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<T> {
    conn.query_row(&sql, rusqlite::params_from_iter(sq_params(&values)), f)
}

/// Run a built SELECT and map every row.
pub fn sq_query_map<T>(
    conn: &Connection,
    (sql, values): db::Built,
    f: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(sq_params(&values)), f)?;
    rows.collect()
}

// ── Row mappers ────────────────────────────────────────────────────────────
// Column order must match the SELECT column lists in staffhub_api::db.

pub fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<EmployeeResponse> {
    let status: String = row.get(5)?;
    Ok(EmployeeResponse {
        id: row.get(0)?,
        name: row.get(1)?,
        position: row.get(2)?,
        department: row.get(3)?,
        email: row.get(4)?,
        status: EmployeeStatus::parse(&status).unwrap_or(EmployeeStatus::Active),
        salary: row.get(6)?,
        manager: row.get(7)?,
        created_at: row.get(8)?,
    })
}

pub fn document_from_row(row: &Row<'_>) -> rusqlite::Result<DocumentResponse> {
    Ok(DocumentResponse {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        document_type: row.get(2)?,
        file_name: row.get(3)?,
        file_path: row.get(4)?,
        mime_type: row.get(5)?,
        upload_date: row.get(6)?,
    })
}

pub fn calendar_event_from_row(row: &Row<'_>) -> rusqlite::Result<CalendarEventResponse> {
    let event_type: String = row.get(4)?;
    Ok(CalendarEventResponse {
        id: row.get(0)?,
        title: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        event_type: EventType::parse(&event_type).unwrap_or(EventType::Other),
        created_by: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn bank_account_from_row(row: &Row<'_>) -> rusqlite::Result<BankAccountResponse> {
    Ok(BankAccountResponse {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        account_type: row.get(2)?,
        account_number: row.get(3)?,
        bank_name: row.get(4)?,
        is_primary: row.get(5)?,
    })
}

pub fn goal_from_row(row: &Row<'_>) -> rusqlite::Result<GoalResponse> {
    let status: String = row.get(4)?;
    Ok(GoalResponse {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: GoalStatus::parse(&status).unwrap_or(GoalStatus::NotStarted),
        progress: row.get(5)?,
        due_date: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn notification_from_row(row: &Row<'_>) -> rusqlite::Result<NotificationResponse> {
    Ok(NotificationResponse {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        is_read: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffhub_api::EmployeeListQuery;

    fn test_db() -> (tempfile::TempDir, Db) {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path()).unwrap();
        (dir, db)
    }

    #[test]
    fn migrations_apply_once() {
        let dir = tempfile::tempdir().unwrap();
        let db = init_db(dir.path()).unwrap();
        drop(db);
        // Re-opening must not fail on already-applied migrations.
        let db = init_db(dir.path()).unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM _migrations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn employee_insert_and_list_round_trip() {
        let (_dir, db) = test_db();
        let conn = db.conn();
        sq_execute(
            &conn,
            staffhub_api::db::employees::insert(
                "e-1",
                "Ada Lovelace",
                "Engineer",
                "Engineering",
                "ada@example.com",
                "active",
                120_000.0,
                None,
            ),
        )
        .unwrap();

        let built = staffhub_api::db::employees::list(&EmployeeListQuery {
            page: 1,
            per_page: 20,
            search: Some("ada".into()),
            status: None,
        });
        let rows = sq_query_map(&conn, built.select_query, employee_from_row).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "ada@example.com");
        assert_eq!(rows[0].status, EmployeeStatus::Active);
    }

    #[test]
    fn upload_write_and_remove() {
        let (_dir, db) = test_db();
        let path = db.write_upload("abc.txt", b"hello").unwrap();
        assert!(path.exists());
        db.remove_upload("abc.txt");
        assert!(!path.exists());
    }
}
