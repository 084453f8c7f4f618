pub mod admin_user;
pub mod course;
pub mod post;
pub mod service;
pub mod submission;
pub mod submission_file;

use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;

pub use admin_user::{AdminUser, NewAdminUser, PublicUser, Role};
pub use course::Course;
pub use post::{NewPost, Post, PostChanges, PostType};
pub use service::{FormField, NewService, Service, ServiceView};
pub use submission::{
    NewSubmission, Submission, SubmissionCounts, SubmissionFilter, SubmissionListItem, SubmissionStatus,
};
pub use submission_file::{NewSubmissionFile, SubmissionFile};

/// A TEXT column or request value outside its enumerated set
#[derive(Debug, Error)]
#[error("Invalid {kind}: {value}")]
pub struct InvalidEnumValue {
    pub kind: &'static str,
    pub value: String,
}

/// Published/draft split shared by posts and courses
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct PublishCounts {
    pub total: i64,
    pub published: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishStats {
    pub total: i64,
    pub published: i64,
    pub drafts: i64,
}

impl From<PublishCounts> for PublishStats {
    fn from(counts: PublishCounts) -> Self {
        Self {
            total: counts.total,
            published: counts.published,
            drafts: counts.total - counts.published,
        }
    }
}
