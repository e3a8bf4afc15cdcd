//! PostgreSQL store on a shared `PgPool`. Multi-step writes run in their own transaction.

use super::{duplicate_email, duplicate_favorite, target_not_found, user_not_found, Store};
use crate::error::{AppError, ConfigError};
use crate::model::{
    Favorite, FavoriteKind, FavoriteRow, NewResource, Resource, User, UserCredentials, UserFavorites,
    UserInsert,
};
use crate::sql;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgConnection, PgPool};
use std::str::FromStr;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn exists(conn: &mut PgConnection, table: &str, id: i32) -> Result<bool, AppError> {
    let sql = sql::exists_by_id(table);
    tracing::debug!(sql = %sql, id, "query (tx)");
    let (found,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(&mut *conn).await?;
    Ok(found)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map(|c| c == UNIQUE_VIOLATION)
        .unwrap_or(false)
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list<T: Resource>(&self) -> Result<Vec<T>, AppError> {
        let sql = sql::select_all::<T>();
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find<T: Resource>(&self, id: i32) -> Result<Option<T>, AppError> {
        let sql = sql::select_by_id::<T>();
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn create<T: Resource>(&self, new: T::New) -> Result<T, AppError> {
        let sql = sql::insert::<T>();
        tracing::debug!(sql = %sql, "query");
        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in new.values() {
            query = query.bind(value);
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let sql = sql::select_users();
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let sql = sql::select_user_by_id();
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let sql = sql::select_credentials_by_email();
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, UserCredentials>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_user(&self, user: UserInsert) -> Result<User, AppError> {
        let sql = sql::insert_user();
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(user.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| if is_unique_violation(&e) { duplicate_email() } else { AppError::Db(e) })
    }

    async fn favorites_of(&self, user_id: i32) -> Result<Option<UserFavorites>, AppError> {
        let mut conn = self.pool.acquire().await?;
        if !exists(&mut *conn, "user", user_id).await? {
            return Ok(None);
        }
        let mut out = UserFavorites::default();
        for kind in FavoriteKind::ALL {
            let sql = sql::select_favorites(kind);
            tracing::debug!(sql = %sql, user_id, "query");
            let rows: Vec<FavoriteRow> = sqlx::query_as(&sql).bind(user_id).fetch_all(&mut *conn).await?;
            for row in rows {
                out.push(row.into_favorite(kind));
            }
        }
        Ok(Some(out))
    }

    async fn add_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<Favorite, AppError> {
        let mut tx = self.pool.begin().await?;
        if !exists(&mut *tx, "user", user_id).await? {
            return Err(user_not_found(user_id));
        }
        if !exists(&mut *tx, kind.target_table(), target_id).await? {
            return Err(target_not_found(kind, target_id));
        }
        let existing: Option<FavoriteRow> = sqlx::query_as(&sql::select_favorite(kind))
            .bind(user_id)
            .bind(target_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(duplicate_favorite(kind, user_id, target_id));
        }
        let sql = sql::insert_favorite(kind);
        tracing::debug!(sql = %sql, user_id, target_id, "query (tx)");
        let row: FavoriteRow = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(target_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate_favorite(kind, user_id, target_id)
                } else {
                    AppError::Db(e)
                }
            })?;
        tx.commit().await?;
        Ok(row.into_favorite(kind))
    }

    async fn remove_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<Option<Favorite>, AppError> {
        let sql = sql::delete_favorite(kind);
        tracing::debug!(sql = %sql, user_id, target_id, "query");
        let row: Option<FavoriteRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .bind(target_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.into_favorite(kind)))
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Invalid {
            var: "DATABASE_URL",
            reason: e.to_string(),
        })?;
    let mut conn: PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| ConfigError::Invalid {
            var: "DATABASE_URL",
            reason: "no path".into(),
        })?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
