//! User profile repository contracts and SQLite implementation.
//!
//! # Invariants
//! - E-mail is unique per profile (case-insensitive).
//! - `settings` is stored as JSON; unreadable JSON is reported as
//!   `InvalidData`, a missing value loads as default settings.

use crate::db::ensure_migrated;
use crate::model::user::{AppSettings, Role, UserId, UserProfile};
use crate::repo::{map_unique_violation, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Repository interface for user profiles.
pub trait UserRepository {
    fn create_user(&self, profile: &UserProfile) -> RepoResult<()>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>>;
    fn update_settings(&self, id: UserId, settings: &AppSettings) -> RepoResult<()>;
    fn update_role(&self, id: UserId, role: Role) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, profile: &UserProfile) -> RepoResult<()> {
        let settings = encode_settings(&profile.settings)?;
        self.conn
            .execute(
                "INSERT INTO users (uuid, email, role, settings, created_by, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    profile.id.to_string(),
                    profile.email.as_str(),
                    profile.role.as_db(),
                    settings,
                    profile.created_by.as_deref(),
                    profile.created_at,
                ],
            )
            .map_err(|err| map_unique_violation(err, "user", &profile.email))?;
        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, email, role, settings, created_by, created_at
             FROM users WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn update_settings(&self, id: UserId, settings: &AppSettings) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET settings = ?1 WHERE uuid = ?2;",
            params![encode_settings(settings)?, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("user", id));
        }
        Ok(())
    }

    fn update_role(&self, id: UserId, role: Role) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE users SET role = ?1 WHERE uuid = ?2;",
            params![role.as_db(), id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("user", id));
        }
        Ok(())
    }
}

fn encode_settings(settings: &AppSettings) -> RepoResult<String> {
    serde_json::to_string(settings)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode user settings: {err}")))
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in users.uuid"))
    })?;

    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in users.role"))
    })?;

    let settings = match row.get::<_, Option<String>>("settings")? {
        Some(json) => serde_json::from_str(&json).map_err(|err| {
            RepoError::InvalidData(format!("invalid settings json in users.settings: {err}"))
        })?,
        None => AppSettings::default(),
    };

    Ok(UserProfile {
        id,
        email: row.get("email")?,
        role,
        settings,
        created_by: row.get("created_by")?,
        created_at: row.get("created_at")?,
    })
}
