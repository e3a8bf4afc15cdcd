//! Domain records: users, catalog entities, and favorites.

pub mod entity;
pub mod favorite;
pub mod user;

pub use entity::*;
pub use favorite::*;
pub use user::*;

use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::PgRow;
use sqlx::FromRow;

/// A flat catalog table whose attributes are all text columns.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    /// Table name in PostgreSQL.
    const TABLE: &'static str;
    /// Singular label used in error messages.
    const LABEL: &'static str;
    /// Attribute columns in insert order, excluding `id`.
    const COLUMNS: &'static [&'static str];

    type New: NewResource;

    fn id(&self) -> i32;
}

/// Insert payload for a [`Resource`].
pub trait NewResource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Values in the same order as [`Resource::COLUMNS`].
    fn values(&self) -> Vec<&str>;
}
