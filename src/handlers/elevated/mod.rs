// handlers/elevated/mod.rs - Elevated handlers (bearer token + admin role)
//
// Routes here stack `require_admin_middleware` inside the bearer gate.

pub mod posts;
