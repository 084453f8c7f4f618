use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use std::str::FromStr;
use uuid::Uuid;

use super::{InvalidEnumValue, PublishCounts};
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostType {
    #[default]
    #[serde(rename = "blog")]
    Blog,
    #[serde(rename = "case-study")]
    CaseStudy,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Blog => "blog",
            PostType::CaseStudy => "case-study",
        }
    }
}

impl FromStr for PostType {
    type Err = InvalidEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(PostType::Blog),
            "case-study" => Ok(PostType::CaseStudy),
            other => Err(InvalidEnumValue {
                kind: "post type",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for PostType {
    type Error = InvalidEnumValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: Uuid,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub author_name: Option<String>,
    pub meta_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(rename = "type", default)]
    pub post_type: PostType,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    pub author_name: Option<String>,
    #[serde(default)]
    pub meta_tags: Vec<String>,
}

/// Partial update; `None` leaves a column untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostChanges {
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_published: Option<bool>,
    pub author_name: Option<String>,
    pub meta_tags: Option<Vec<String>>,
}

const POST_COLUMNS: &str = r#"id, "type", slug, title, content, excerpt, cover_image_url, is_published,
    published_at, author_name, meta_tags, created_at, updated_at"#;

impl Post {
    /// Published posts, newest publication first, optionally narrowed to one type.
    pub async fn list_published<'e>(
        executor: impl PgExecutor<'e>,
        post_type: Option<PostType>,
    ) -> Result<Vec<Self>, DatabaseError> {
        let sql = format!(
            r#"SELECT {POST_COLUMNS} FROM posts
            WHERE is_published = true AND ($1::text IS NULL OR "type" = $1)
            ORDER BY published_at DESC NULLS LAST, created_at DESC"#
        );
        let posts = sqlx::query_as::<_, Self>(&sql)
            .bind(post_type.map(|t| t.as_str()))
            .fetch_all(executor)
            .await?;
        Ok(posts)
    }

    pub async fn find_published_by_slug<'e>(
        executor: impl PgExecutor<'e>,
        slug: &str,
    ) -> Result<Option<Self>, DatabaseError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1 AND is_published = true");
        let post = sqlx::query_as::<_, Self>(&sql)
            .bind(slug)
            .fetch_optional(executor)
            .await?;
        Ok(post)
    }

    /// Every post including drafts, most recently created first.
    pub async fn list_all<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<Self>, DatabaseError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC");
        let posts = sqlx::query_as::<_, Self>(&sql).fetch_all(executor).await?;
        Ok(posts)
    }

    pub async fn create<'e>(executor: impl PgExecutor<'e>, post: &NewPost) -> Result<Self, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO posts
                ("type", slug, title, content, excerpt, cover_image_url, is_published, published_at, author_name, meta_tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $7 THEN now() END, $8, $9)
            RETURNING {POST_COLUMNS}"#
        );
        let created = sqlx::query_as::<_, Self>(&sql)
            .bind(post.post_type.as_str())
            .bind(&post.slug)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.excerpt)
            .bind(&post.cover_image_url)
            .bind(post.is_published)
            .bind(&post.author_name)
            .bind(&post.meta_tags)
            .fetch_one(executor)
            .await?;
        Ok(created)
    }

    /// Applies `changes`. `published_at` is stamped on the first publish and cleared on unpublish.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<Self>, DatabaseError> {
        let sql = format!(
            r#"UPDATE posts SET
                "type" = COALESCE($2::text, "type"),
                slug = COALESCE($3::text, slug),
                title = COALESCE($4::text, title),
                content = COALESCE($5::text, content),
                excerpt = COALESCE($6::text, excerpt),
                cover_image_url = COALESCE($7::text, cover_image_url),
                author_name = COALESCE($8::text, author_name),
                meta_tags = COALESCE($9::text[], meta_tags),
                is_published = COALESCE($10::boolean, is_published),
                published_at = CASE
                    WHEN $10::boolean IS NULL THEN published_at
                    WHEN $10::boolean THEN COALESCE(published_at, now())
                    ELSE NULL
                END,
                updated_at = now()
            WHERE id = $1
            RETURNING {POST_COLUMNS}"#
        );
        let updated = sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .bind(changes.post_type.map(|t| t.as_str()))
            .bind(&changes.slug)
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(&changes.excerpt)
            .bind(&changes.cover_image_url)
            .bind(&changes.author_name)
            .bind(&changes.meta_tags)
            .bind(changes.is_published)
            .fetch_optional(executor)
            .await?;
        Ok(updated)
    }

    /// True when a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn counts<'e>(executor: impl PgExecutor<'e>) -> Result<PublishCounts, DatabaseError> {
        let counts = sqlx::query_as::<_, PublishCounts>(
            "SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE is_published) AS published FROM posts",
        )
        .fetch_one(executor)
        .await?;
        Ok(counts)
    }
}
