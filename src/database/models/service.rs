use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, PgExecutor};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// One input on a service's intake form, rendered in order by the client.
///
/// Used when writing the catalog. Stored descriptors are read back as raw JSON so a
/// hand-edited row can't break the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

fn default_field_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub form_fields: Option<Json<Value>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub form_fields: Value,
}

impl From<Service> for ServiceView {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            slug: service.slug,
            title: service.title,
            description: service.description,
            icon: service.icon,
            category: service.category,
            form_fields: match service.form_fields {
                Some(Json(fields @ Value::Array(_))) => fields,
                _ => Value::Array(Vec::new()),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category: String,
    pub form_fields: Vec<FormField>,
}

impl Service {
    pub async fn list_active<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, DatabaseError> {
        let services = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, slug, title, description, icon, category, form_fields, is_active, created_at
            FROM services
            WHERE is_active = true
            ORDER BY title
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(services)
    }

    pub async fn find_active_by_slug<'e>(
        executor: impl PgExecutor<'e>,
        slug: &str,
    ) -> Result<Option<Self>, DatabaseError> {
        let service = sqlx::query_as::<_, Self>(
            r#"
            SELECT id, slug, title, description, icon, category, form_fields, is_active, created_at
            FROM services
            WHERE slug = $1 AND is_active = true
            "#,
        )
        .bind(slug)
        .fetch_optional(executor)
        .await?;
        Ok(service)
    }

    pub async fn count<'e>(executor: impl PgExecutor<'e>) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Inserts unless the slug is taken; returns whether a row was written.
    pub async fn insert<'e>(executor: impl PgExecutor<'e>, service: &NewService) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO services (slug, title, description, icon, category, form_fields)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(&service.slug)
        .bind(&service.title)
        .bind(&service.description)
        .bind(&service.icon)
        .bind(&service.category)
        .bind(Json(&service.form_fields))
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
