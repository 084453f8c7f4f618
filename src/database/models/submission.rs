use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use super::{InvalidEnumValue, SubmissionFile};
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Reviewed,
    Contacted,
    Archived,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::New,
        SubmissionStatus::Reviewed,
        SubmissionStatus::Contacted,
        SubmissionStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Reviewed => "reviewed",
            SubmissionStatus::Contacted => "contacted",
            SubmissionStatus::Archived => "archived",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidEnumValue {
                kind: "status",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for SubmissionStatus {
    type Error = InvalidEnumValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub service_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSubmission {
    pub service_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub message: String,
}

/// Optional admin list filters, ANDed when both are present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionFilter {
    pub status: Option<String>,
    pub service: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
struct SubmissionWithService {
    #[sqlx(flatten)]
    submission: Submission,
    service_slug: Option<String>,
    service_title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionListItem {
    #[serde(flatten)]
    pub submission: Submission,
    pub service_slug: Option<String>,
    pub service_title: Option<String>,
    pub files: Vec<SubmissionFile>,
}

/// Point-in-time status counts. Archived rows count toward `total` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct SubmissionCounts {
    pub total: i64,
    pub new: i64,
    pub reviewed: i64,
    pub contacted: i64,
}

const SUBMISSION_COLUMNS: &str =
    "s.id, s.service_id, s.full_name, s.email, s.company, s.phone, s.message, s.status, s.created_at";

impl Submission {
    /// Inserts a fresh submission; status and created_at come from column defaults.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        submission: &NewSubmission,
    ) -> Result<Self, DatabaseError> {
        let created = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO submissions (service_id, full_name, email, company, phone, message, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'new')
            RETURNING id, service_id, full_name, email, company, phone, message, status, created_at
            "#,
        )
        .bind(submission.service_id)
        .bind(&submission.full_name)
        .bind(&submission.email)
        .bind(&submission.company)
        .bind(&submission.phone)
        .bind(&submission.message)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    pub async fn find_by_id<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<Option<Self>, DatabaseError> {
        let submission = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, service_id, full_name, email, company, phone, message, status, created_at
            FROM submissions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(submission)
    }

    /// Overwrites the status; `None` when no row has this id.
    pub async fn update_status<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<Self>, DatabaseError> {
        let updated = sqlx::query_as::<_, Self>(
            r#"
            UPDATE submissions SET status = $2
            WHERE id = $1
            RETURNING id, service_id, full_name, email, company, phone, message, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(executor)
        .await?;
        Ok(updated)
    }

    /// Newest first, joined to the owning service and its attached files.
    pub async fn list(pool: &PgPool, filter: &SubmissionFilter) -> Result<Vec<SubmissionListItem>, DatabaseError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SUBMISSION_COLUMNS}, sv.slug AS service_slug, sv.title AS service_title \
             FROM submissions s LEFT JOIN services sv ON sv.id = s.service_id WHERE TRUE"
        ));
        if let Some(status) = &filter.status {
            query.push(" AND s.status = ").push_bind(status.clone());
        }
        if let Some(service) = &filter.service {
            query.push(" AND sv.slug = ").push_bind(service.clone());
        }
        query.push(" ORDER BY s.created_at DESC");

        let rows: Vec<SubmissionWithService> = query.build_query_as().fetch_all(pool).await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.submission.id).collect();
        let mut files: HashMap<Uuid, Vec<SubmissionFile>> = HashMap::new();
        for file in SubmissionFile::list_for_submissions(pool, &ids).await? {
            files.entry(file.submission_id).or_default().push(file);
        }

        Ok(rows
            .into_iter()
            .map(|row| SubmissionListItem {
                files: files.remove(&row.submission.id).unwrap_or_default(),
                submission: row.submission,
                service_slug: row.service_slug,
                service_title: row.service_title,
            })
            .collect())
    }

    pub async fn counts<'e>(executor: impl PgExecutor<'e>) -> Result<SubmissionCounts, DatabaseError> {
        let counts = sqlx::query_as::<_, SubmissionCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'new') AS "new",
                COUNT(*) FILTER (WHERE status = 'reviewed') AS reviewed,
                COUNT(*) FILTER (WHERE status = 'contacted') AS contacted
            FROM submissions
            "#,
        )
        .fetch_one(executor)
        .await?;
        Ok(counts)
    }
}
