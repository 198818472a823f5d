//! Product catalog service: products, their tags and media properties,
//! managed through server-rendered forms.

pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required for every catalog page.
pub const SERVICE_ACCESS_ROLE: &str = "admin";
