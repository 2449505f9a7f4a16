//! SQLite-based task storage.
//!
//! Tasks are stored as plain text columns and turned back into validated
//! [`TaskRecord`]s on read. A due date that no longer parses loads as "no
//! due date"; a row that fails validation otherwise is reported as corrupt.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::task::{RawTaskRecord, TaskRecord, TaskStatus};

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, category, status, priority, due_date, created_at FROM tasks";

/// Criteria for [`TaskDb::find_tasks`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Exact category name
    pub category: Option<String>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl TaskFilter {
    fn matches_search(&self, task: &TaskRecord) -> bool {
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => task
                .title()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// SQLite database for task storage.
pub struct TaskDb {
    conn: Connection,
}

impl TaskDb {
    /// Open the database at `<data dir>/taskmind.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("taskmind.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT,
                category    TEXT NOT NULL DEFAULT 'General',
                status      TEXT NOT NULL DEFAULT 'pending',
                priority    TEXT NOT NULL DEFAULT 'medium',
                due_date    TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);",
        )?;

        // Databases created before categories existed lack the column.
        let has_category: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('tasks') WHERE name = 'category'",
            [],
            |row| row.get(0),
        )?;
        if !has_category {
            self.conn.execute_batch(
                "ALTER TABLE tasks ADD COLUMN category TEXT NOT NULL DEFAULT 'General';",
            )?;
        }
        Ok(())
    }

    /// Insert a new task.
    pub fn create_task(&self, task: &TaskRecord) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, description, category, status, priority, due_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id(),
                task.title(),
                task.description(),
                task.category(),
                task.status().as_str(),
                task.priority().as_str(),
                task.due_date().map(|d| d.format("%Y-%m-%d").to_string()),
                task.created_at().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a task by ID.
    pub fn get_task(&self, id: &str) -> Result<Option<TaskRecord>, CoreError> {
        let raw = self
            .conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], row_to_raw)
            .optional()?;
        raw.map(into_record).transpose()
    }

    /// List all tasks, oldest first.
    pub fn list_tasks(&self) -> Result<Vec<TaskRecord>, CoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at, id"))?;
        let rows = stmt.query_map([], row_to_raw)?;

        let mut tasks = Vec::new();
        for raw in rows {
            tasks.push(into_record(raw?)?);
        }
        Ok(tasks)
    }

    /// Tasks matching `filter`, newest first.
    pub fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskRecord>, CoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS}
             WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR category = ?2)
             ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(
            params![filter.status.map(|s| s.as_str()), filter.category.as_deref()],
            row_to_raw,
        )?;

        let mut tasks = Vec::new();
        for raw in rows {
            let task = into_record(raw?)?;
            if filter.matches_search(&task) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Overwrite every stored field of an existing task.
    ///
    /// Returns `false` when no task has this ID.
    pub fn update_task(&self, task: &TaskRecord) -> Result<bool, CoreError> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET title = ?2, description = ?3, category = ?4, status = ?5, priority = ?6,
                 due_date = ?7
             WHERE id = ?1",
            params![
                task.id(),
                task.title(),
                task.description(),
                task.category(),
                task.status().as_str(),
                task.priority().as_str(),
                task.due_date().map(|d| d.format("%Y-%m-%d").to_string()),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task. Returns `false` when no task has this ID.
    pub fn delete_task(&self, id: &str) -> Result<bool, CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn row_to_raw(row: &rusqlite::Row) -> Result<RawTaskRecord, rusqlite::Error> {
    Ok(RawTaskRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        status: row.get(4)?,
        priority: row.get(5)?,
        due_date: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn into_record(raw: RawTaskRecord) -> Result<TaskRecord, CoreError> {
    let id = raw.id.clone();
    TaskRecord::try_from(raw)
        .map_err(|source| CoreError::Database(DatabaseError::CorruptRow { id, source }))
}
