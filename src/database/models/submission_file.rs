use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// Metadata for a file attached to a submission. Storage itself lives elsewhere.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubmissionFile {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub original_name: String,
    pub storage_path: String,
    pub file_type: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmissionFile {
    pub submission_id: Uuid,
    pub original_name: String,
    pub storage_path: String,
    pub file_type: Option<String>,
    pub file_size_bytes: Option<i64>,
}

impl SubmissionFile {
    pub async fn attach<'e>(
        executor: impl PgExecutor<'e>,
        file: &NewSubmissionFile,
    ) -> Result<Self, DatabaseError> {
        let attached = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO submission_files (submission_id, original_name, storage_path, file_type, file_size_bytes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, submission_id, original_name, storage_path, file_type, file_size_bytes, uploaded_at
            "#,
        )
        .bind(file.submission_id)
        .bind(&file.original_name)
        .bind(&file.storage_path)
        .bind(&file.file_type)
        .bind(file.file_size_bytes)
        .fetch_one(executor)
        .await?;
        Ok(attached)
    }

    pub async fn list_for_submissions<'e>(
        executor: impl PgExecutor<'e>,
        submission_ids: &[Uuid],
    ) -> Result<Vec<Self>, DatabaseError> {
        if submission_ids.is_empty() {
            return Ok(vec![]);
        }
        let files = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, submission_id, original_name, storage_path, file_type, file_size_bytes, uploaded_at
            FROM submission_files
            WHERE submission_id = ANY($1)
            ORDER BY uploaded_at
            "#,
        )
        .bind(submission_ids)
        .fetch_all(executor)
        .await?;
        Ok(files)
    }
}
