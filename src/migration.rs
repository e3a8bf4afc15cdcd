//! Schema bootstrap: idempotent DDL for entity, user and favorites tables.
//! Order follows foreign-key dependencies: users and catalog tables first, then associations.

use crate::error::AppError;
use crate::model::{FavoriteKind, People, Planet, Resource, Vehicle};
use crate::sql::quoted;
use sqlx::PgPool;

const TEXT: &str = "VARCHAR(120) NOT NULL";

fn user_table_ddl() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {} SERIAL PRIMARY KEY,\n  {} {} UNIQUE,\n  {} VARCHAR(255) NOT NULL,\n  {} {},\n  {} BOOLEAN NOT NULL DEFAULT TRUE\n)",
        quoted("user"),
        quoted("id"),
        quoted("email"),
        TEXT,
        quoted("password_hash"),
        quoted("name"),
        TEXT,
        quoted("is_active")
    )
}

fn catalog_table_ddl<T: Resource>() -> String {
    let mut col_defs = vec![format!("{} SERIAL PRIMARY KEY", quoted("id"))];
    col_defs.extend(T::COLUMNS.iter().map(|c| format!("{} {}", quoted(c), TEXT)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(T::TABLE),
        col_defs.join(",\n  ")
    )
}

/// One association table. The unique pair backs the no-duplicate rule; FKs use NO ACTION.
fn favorite_table_ddl(kind: FavoriteKind) -> String {
    let target = quoted(kind.target_column());
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {} SERIAL PRIMARY KEY,\n  {} INTEGER NOT NULL REFERENCES {} ({}),\n  {} INTEGER NOT NULL REFERENCES {} ({}),\n  UNIQUE ({}, {})\n)",
        quoted(kind.table()),
        quoted("id"),
        quoted("user_id"),
        quoted("user"),
        quoted("id"),
        target,
        quoted(kind.target_table()),
        quoted("id"),
        quoted("user_id"),
        target
    )
}

/// Every statement in dependency order.
pub fn schema_statements() -> Vec<String> {
    let mut out = vec![
        user_table_ddl(),
        catalog_table_ddl::<People>(),
        catalog_table_ddl::<Planet>(),
        catalog_table_ddl::<Vehicle>(),
    ];
    for kind in FavoriteKind::ALL {
        out.push(favorite_table_ddl(kind));
    }
    out
}

/// Apply the schema in one transaction. Safe to run on every start.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in schema_statements() {
        tracing::debug!(sql = %ddl, "migration");
        sqlx::query(&ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("schema ready");
    Ok(())
}
