//! Galaxy API: people, planets, vehicles and per-user favorites over REST, backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use response::{success_many, success_one_ok};
pub use routes::app;
pub use service::TokenIssuer;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
