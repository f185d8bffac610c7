use crate::auth::Session;
use crate::error::{Result, TrackerError};
use crate::models::issue::{is_transition_allowed, Issue, IssueDraft, Priority, Status};
use crate::store::IssueStore;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use std::path::Path;

const DB_SCHEMA_VERSION: i64 = 2;

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Priority::parse(text).ok_or_else(|| {
            FromSqlError::Other(format!("unknown priority '{text}'").into())
        })
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Status::parse(text)
            .ok_or_else(|| FromSqlError::Other(format!("unknown status '{text}'").into()))
    }
}

pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version < 2 {
        apply_migration_2(conn)?;
        version = 2;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        // Newer schema than this build knows; leave it untouched.
        conn.pragma_update(None, "user_version", version)?;
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS issues (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            priority TEXT NOT NULL CHECK(priority IN ('low', 'medium', 'high')),
            status TEXT NOT NULL CHECK(status IN ('open', 'in_progress', 'done')) DEFAULT 'open',
            assigned_to TEXT NOT NULL DEFAULT '',
            created_by TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );
        ",
    )
}

fn apply_migration_2(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
        CREATE INDEX IF NOT EXISTS idx_issues_created_at ON issues(created_at);
        ",
    )
}

/// SQLite-backed issue store. Holds at most one signed-in session; every
/// operation checks it and fails with `Unauthorized` when absent.
pub struct SqliteIssueStore {
    conn: Connection,
    session: Option<Session>,
}

impl SqliteIssueStore {
    pub fn open(db_path: &Path) -> Result<SqliteIssueStore> {
        let conn = Connection::open(db_path)?;
        initialize_schema(&conn)?;
        Ok(SqliteIssueStore {
            conn,
            session: None,
        })
    }

    pub fn open_in_memory() -> Result<SqliteIssueStore> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(SqliteIssueStore {
            conn,
            session: None,
        })
    }

    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("signed out {}", session.identity());
        }
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(TrackerError::Unauthorized)
    }

    fn load_status(&self, id: &str) -> Result<Status> {
        self.conn
            .query_row(
                "SELECT status FROM issues WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))
    }
}

impl IssueStore for SqliteIssueStore {
    fn fetch_all(&self) -> Result<Vec<Issue>> {
        self.require_session()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, priority, status, assigned_to, created_by, created_at FROM issues",
        )?;
        let issues = stmt
            .query_map([], |row| {
                Ok(Issue {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    priority: row.get(3)?,
                    status: row.get(4)?,
                    assigned_to: row.get(5)?,
                    created_by: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<Issue>>>()?;

        Ok(issues)
    }

    fn create(&self, draft: &IssueDraft) -> Result<Issue> {
        self.require_session()?;

        let issue = Issue {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            status: Status::Open,
            assigned_to: draft.assigned_to.clone(),
            created_by: draft.created_by.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.conn.execute(
            "INSERT INTO issues (id, title, description, priority, status, assigned_to, created_by, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                issue.id,
                issue.title,
                issue.description,
                issue.priority,
                issue.status,
                issue.assigned_to,
                issue.created_by,
                issue.created_at,
            ],
        )?;

        log::debug!("created issue {} ({:?})", issue.id, issue.title);
        Ok(issue)
    }

    fn update_status(&self, id: &str, new_status: Status) -> Result<()> {
        self.require_session()?;

        let current = self.load_status(id)?;
        if !is_transition_allowed(current, new_status) {
            return Err(TrackerError::TransitionRejected {
                from: current,
                to: new_status,
            });
        }

        self.conn.execute(
            "UPDATE issues SET status = ?2 WHERE id = ?1",
            params![id, new_status],
        )?;

        log::debug!("issue {id}: {current} -> {new_status}");
        Ok(())
    }
}
