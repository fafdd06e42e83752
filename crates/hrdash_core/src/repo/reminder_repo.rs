//! Reminder repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store the active set (`reminders`) and the archived set
//!   (`archived_reminders`).
//! - Answer filtered active-set queries with equality and range predicates.
//!
//! # Invariants
//! - Active-set queries order by `ends_at ASC`, then insertion order.
//! - Archiving moves the row (insert into archive + delete from active) in
//!   one transaction; a reminder is never in both sets.

use crate::db::ensure_migrated;
use crate::model::employee::EmployeeId;
use crate::model::org::CompanyId;
use crate::model::reminder::{normalize_category, Reminder, ReminderId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use uuid::Uuid;

const ARCHIVED_DEFAULT_LIMIT: u32 = 50;
const ARCHIVED_LIMIT_MAX: u32 = 500;

/// Filter for active-set queries. Every field is optional; `None` means
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveReminderFilter {
    pub employee_id: Option<EmployeeId>,
    /// Compared after category normalization.
    pub category: Option<String>,
    /// Half-open `[from, until)` range on `starts_at`.
    pub starts_between: Option<(i64, i64)>,
    /// Inclusive lower bound on `ends_at`.
    pub ends_at_or_after: Option<i64>,
    /// Only reminders whose employee belongs to this company.
    pub company_id: Option<CompanyId>,
}

/// Repository interface for reminder lifecycle storage.
pub trait ReminderRepository {
    fn insert_reminder(&self, reminder: &Reminder) -> RepoResult<ReminderId>;
    fn find_active(&self, filter: &ActiveReminderFilter) -> RepoResult<Vec<Reminder>>;
    /// Looks up one reminder in the active set, then the archived set.
    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>>;
    /// Moves one active reminder to the archived set.
    ///
    /// Returns `RepoError::NotFound` when `id` is not in the active set.
    fn archive_reminder(&self, id: ReminderId, archived_at: i64) -> RepoResult<Reminder>;
    /// Archived reminders, most recently archived first.
    fn list_archived(&self, limit: Option<u32>) -> RepoResult<Vec<Reminder>>;
}

/// SQLite-backed reminder repository.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn insert_reminder(&self, reminder: &Reminder) -> RepoResult<ReminderId> {
        reminder.validate()?;

        self.conn.execute(
            "INSERT INTO reminders (uuid, category, description, starts_at, ends_at, employee_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                reminder.id.to_string(),
                reminder.category.as_str(),
                reminder.description.as_str(),
                reminder.starts_at,
                reminder.ends_at,
                reminder.employee_id,
            ],
        )?;

        Ok(reminder.id)
    }

    fn find_active(&self, filter: &ActiveReminderFilter) -> RepoResult<Vec<Reminder>> {
        let mut sql = String::from(
            "SELECT uuid, category, description, starts_at, ends_at, employee_id,
                    NULL AS archived_at
             FROM reminders
             WHERE 1 = 1",
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(employee_id) = filter.employee_id {
            sql.push_str(" AND employee_id = ?");
            bind_values.push(Value::Integer(employee_id));
        }
        if let Some(category) = filter.category.as_deref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(normalize_category(category)));
        }
        if let Some((from, until)) = filter.starts_between {
            sql.push_str(" AND starts_at >= ? AND starts_at < ?");
            bind_values.push(Value::Integer(from));
            bind_values.push(Value::Integer(until));
        }
        if let Some(lower_bound) = filter.ends_at_or_after {
            sql.push_str(" AND ends_at >= ?");
            bind_values.push(Value::Integer(lower_bound));
        }
        if let Some(company_id) = filter.company_id {
            sql.push_str(" AND employee_id IN (SELECT id FROM employees WHERE company_id = ?)");
            bind_values.push(Value::Integer(company_id));
        }
        sql.push_str(" ORDER BY ends_at ASC, seq ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }
        Ok(reminders)
    }

    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, category, description, starts_at, ends_at, employee_id,
                    NULL AS archived_at
             FROM reminders WHERE uuid = ?1
             UNION ALL
             SELECT uuid, category, description, starts_at, ends_at, employee_id, archived_at
             FROM archived_reminders WHERE uuid = ?1
             LIMIT 1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reminder_row(row)?));
        }
        Ok(None)
    }

    fn archive_reminder(&self, id: ReminderId, archived_at: i64) -> RepoResult<Reminder> {
        let tx = self.conn.unchecked_transaction()?;

        let active = tx
            .query_row(
                "SELECT uuid, category, description, starts_at, ends_at, employee_id,
                        NULL AS archived_at
                 FROM reminders WHERE uuid = ?1;",
                [id.to_string()],
                |row| Ok(parse_reminder_row(row)),
            )
            .optional()?
            .transpose()?;
        let Some(mut reminder) = active else {
            return Err(RepoError::not_found("reminder", id));
        };

        tx.execute(
            "INSERT INTO archived_reminders (
                uuid, category, description, starts_at, ends_at, employee_id, archived_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                reminder.id.to_string(),
                reminder.category.as_str(),
                reminder.description.as_str(),
                reminder.starts_at,
                reminder.ends_at,
                reminder.employee_id,
                archived_at,
            ],
        )?;
        tx.execute("DELETE FROM reminders WHERE uuid = ?1;", [id.to_string()])?;
        tx.commit()?;

        reminder.archived_at = Some(archived_at);
        Ok(reminder)
    }

    fn list_archived(&self, limit: Option<u32>) -> RepoResult<Vec<Reminder>> {
        let applied_limit = limit
            .unwrap_or(ARCHIVED_DEFAULT_LIMIT)
            .clamp(1, ARCHIVED_LIMIT_MAX);
        let mut stmt = self.conn.prepare(
            "SELECT uuid, category, description, starts_at, ends_at, employee_id, archived_at
             FROM archived_reminders
             ORDER BY archived_at DESC, uuid ASC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([i64::from(applied_limit)])?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }
        Ok(reminders)
    }
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in reminders.uuid"))
    })?;

    let reminder = Reminder {
        id,
        category: row.get("category")?,
        description: row.get("description")?,
        starts_at: row.get("starts_at")?,
        ends_at: row.get("ends_at")?,
        employee_id: row.get("employee_id")?,
        archived_at: row.get("archived_at")?,
    };
    reminder.validate()?;
    Ok(reminder)
}
