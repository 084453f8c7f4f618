use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use super::PublishCounts;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub duration_minutes: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub content_url: Option<String>,
    pub price_cents: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub async fn list_published<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, DatabaseError> {
        let courses = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, title, slug, description, difficulty, duration_minutes,
                   thumbnail_url, content_url, price_cents, is_published, created_at
            FROM courses
            WHERE is_published = true
            ORDER BY title
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(courses)
    }

    pub async fn counts<'e>(executor: impl PgExecutor<'e>) -> Result<PublishCounts, DatabaseError> {
        let counts = sqlx::query_as::<_, PublishCounts>(
            "SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE is_published) AS published FROM courses",
        )
        .fetch_one(executor)
        .await?;
        Ok(counts)
    }
}
