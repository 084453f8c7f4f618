use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use std::str::FromStr;
use uuid::Uuid;

use super::InvalidEnumValue;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl FromStr for Role {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            other => Err(InvalidEnumValue {
                kind: "role",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = InvalidEnumValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Fields safe to return to a client. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl AdminUser {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            last_login: self.last_login,
        }
    }

    pub async fn find_active_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, DatabaseError> {
        let user = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, username, email, password_hash, role, is_active, last_login, created_at
            FROM admin_users
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(user)
    }

    pub async fn find_active_by_username<'e>(
        executor: impl PgExecutor<'e>,
        username: &str,
    ) -> Result<Option<Self>, DatabaseError> {
        let user = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, username, email, password_hash, role, is_active, last_login, created_at
            FROM admin_users
            WHERE username = $1 AND is_active = true
            "#,
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;
        Ok(user)
    }

    /// Stamps `last_login` with the current time and returns the stored value.
    pub async fn record_login<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<DateTime<Utc>, DatabaseError> {
        let (last_login,): (DateTime<Utc>,) =
            sqlx::query_as("UPDATE admin_users SET last_login = now() WHERE id = $1 RETURNING last_login")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(last_login)
    }

    pub async fn count<'e>(executor: impl PgExecutor<'e>) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Inserts unless the username or email is taken; returns whether a row was written.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        user: &NewAdminUser,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO admin_users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
