// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Catalog reads, lead intake, token acquisition, demo seeding and health.

pub mod content;
pub mod health;
pub mod login;
pub mod seed;
pub mod services;
