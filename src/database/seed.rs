//! Demo data: one default admin and the starter service catalog.
//!
//! Both inserts are guarded by a row count, so running the seed again is a no-op.
//! The default credentials are for local and staging use only.

use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use super::manager::DatabaseError;
use super::models::{AdminUser, FormField, NewAdminUser, NewService, Role, Service};
use crate::auth::password::{hash_password_blocking, PasswordError};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        SeedError::Database(err.into())
    }
}

/// What a single seed run actually wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub admin_created: bool,
    pub services_created: usize,
}

pub async fn seed_demo_data(pool: &PgPool) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    if AdminUser::count(&mut *tx).await? == 0 {
        let password_hash = hash_password_blocking(DEFAULT_ADMIN_PASSWORD.to_string()).await?;
        let admin = NewAdminUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password_hash,
            role: Role::Admin,
        };
        report.admin_created = AdminUser::insert(&mut *tx, &admin).await?;
    }

    if Service::count(&mut *tx).await? == 0 {
        for service in demo_services() {
            if Service::insert(&mut *tx, &service).await? {
                report.services_created += 1;
            }
        }
    }

    tx.commit().await?;

    info!(
        admin_created = report.admin_created,
        services_created = report.services_created,
        "Demo seed finished"
    );
    Ok(report)
}

fn field(name: &str, label: &str, field_type: &str, required: bool) -> FormField {
    FormField {
        name: name.to_string(),
        label: label.to_string(),
        field_type: field_type.to_string(),
        required,
        placeholder: None,
        options: Vec::new(),
    }
}

fn select(name: &str, label: &str, options: &[&str]) -> FormField {
    FormField {
        options: options.iter().map(|o| o.to_string()).collect(),
        ..field(name, label, "select", false)
    }
}

/// The starter catalog, in display order.
pub fn demo_services() -> Vec<NewService> {
    vec![
        NewService {
            slug: "web-development".to_string(),
            title: "Web Development".to_string(),
            description: "Custom websites and web applications built for performance and growth.".to_string(),
            icon: "code".to_string(),
            category: "development".to_string(),
            form_fields: vec![
                select("project_type", "Project type", &["New website", "Redesign", "Web application", "E-commerce"]),
                select("budget", "Budget", &["< $5k", "$5k - $15k", "$15k - $50k", "$50k+"]),
                field("timeline", "Desired timeline", "text", false),
            ],
        },
        NewService {
            slug: "mobile-app-development".to_string(),
            title: "Mobile App Development".to_string(),
            description: "Native and cross-platform mobile apps for iOS and Android.".to_string(),
            icon: "smartphone".to_string(),
            category: "development".to_string(),
            form_fields: vec![
                select("platforms", "Platforms", &["iOS", "Android", "Both"]),
                field("features", "Key features", "textarea", false),
                select("budget", "Budget", &["< $10k", "$10k - $30k", "$30k+"]),
            ],
        },
        NewService {
            slug: "digital-marketing".to_string(),
            title: "Digital Marketing".to_string(),
            description: "SEO, paid campaigns and social media strategy that bring in qualified leads.".to_string(),
            icon: "trending-up".to_string(),
            category: "marketing".to_string(),
            form_fields: vec![
                field("website_url", "Current website", "url", false),
                select("channels", "Channels of interest", &["SEO", "Paid ads", "Social media", "Email"]),
                field("monthly_budget", "Monthly budget", "text", false),
            ],
        },
        NewService {
            slug: "it-consulting".to_string(),
            title: "IT Consulting".to_string(),
            description: "Architecture reviews, cloud migration and technology strategy.".to_string(),
            icon: "briefcase".to_string(),
            category: "consulting".to_string(),
            form_fields: vec![
                field("challenge", "What are you trying to solve?", "textarea", true),
                select("team_size", "Team size", &["1-10", "11-50", "51-200", "200+"]),
            ],
        },
    ]
}
