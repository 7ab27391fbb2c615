//! Jobboard: REST backend for companies and jobs on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use response::{success_many, success_one};
pub use routes::{app, common_routes, common_routes_with_ready, entity_routes};
pub use service::{CompanyService, JobService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
