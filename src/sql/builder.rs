//! Builds parameterized SELECT, INSERT and DELETE for catalog, user and favorite tables.
//! Identifiers come from compile-time constants only; values are always bound as parameters.

use crate::model::{FavoriteKind, Resource};

/// Quote identifier for PostgreSQL.
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

const USER_TABLE: &str = "user";
const USER_COLUMNS: &[&str] = &["id", "email", "name", "is_active"];

/// `"id", "col1", ...` for a catalog resource.
fn resource_column_list<T: Resource>() -> String {
    std::iter::once("id")
        .chain(T::COLUMNS.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(start: usize, n: usize) -> String {
    (start..start + n)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT every row ordered by id.
pub fn select_all<T: Resource>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        resource_column_list::<T>(),
        quoted(T::TABLE),
        quoted("id")
    )
}

/// SELECT by id. Caller binds the id as $1.
pub fn select_by_id<T: Resource>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        resource_column_list::<T>(),
        quoted(T::TABLE),
        quoted("id")
    )
}

/// INSERT every attribute column; values bound in [`Resource::COLUMNS`] order.
pub fn insert<T: Resource>() -> String {
    let cols: Vec<String> = T::COLUMNS.iter().map(|c| quoted(c)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(T::TABLE),
        cols.join(", "),
        placeholders(1, cols.len()),
        resource_column_list::<T>()
    )
}

/// `SELECT EXISTS(...)` on the id of any table. Caller binds the id as $1.
pub fn exists_by_id(table: &str) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
        quoted(table),
        quoted("id")
    )
}

fn user_column_list() -> String {
    USER_COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

pub fn select_users() -> String {
    format!("SELECT {} FROM {} ORDER BY {}", user_column_list(), quoted(USER_TABLE), quoted("id"))
}

pub fn select_user_by_id() -> String {
    format!("SELECT {} FROM {} WHERE {} = $1", user_column_list(), quoted(USER_TABLE), quoted("id"))
}

/// Credentials lookup by email for the auth gate.
pub fn select_credentials_by_email() -> String {
    format!(
        "SELECT {}, {}, {}, {} FROM {} WHERE {} = $1",
        quoted("id"),
        quoted("email"),
        quoted("password_hash"),
        quoted("is_active"),
        quoted(USER_TABLE),
        quoted("email")
    )
}

/// Binds email, password_hash, name, is_active.
pub fn insert_user() -> String {
    format!(
        "INSERT INTO {} ({}, {}, {}, {}) VALUES ($1, $2, $3, $4) RETURNING {}",
        quoted(USER_TABLE),
        quoted("email"),
        quoted("password_hash"),
        quoted("name"),
        quoted("is_active"),
        user_column_list()
    )
}

/// `"id", "user_id", "<target>" AS "target_id"` so every association table maps to one row type.
fn favorite_column_list(kind: FavoriteKind) -> String {
    format!(
        "{}, {}, {} AS {}",
        quoted("id"),
        quoted("user_id"),
        quoted(kind.target_column()),
        quoted("target_id")
    )
}

/// Favorites of one user ($1) ordered by id.
pub fn select_favorites(kind: FavoriteKind) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
        favorite_column_list(kind),
        quoted(kind.table()),
        quoted("user_id"),
        quoted("id")
    )
}

/// One association by (user_id = $1, target = $2).
pub fn select_favorite(kind: FavoriteKind) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1 AND {} = $2",
        favorite_column_list(kind),
        quoted(kind.table()),
        quoted("user_id"),
        quoted(kind.target_column())
    )
}

pub fn insert_favorite(kind: FavoriteKind) -> String {
    format!(
        "INSERT INTO {} ({}, {}) VALUES ($1, $2) RETURNING {}",
        quoted(kind.table()),
        quoted("user_id"),
        quoted(kind.target_column()),
        favorite_column_list(kind)
    )
}

/// DELETE by (user_id = $1, target = $2), returning the removed row if any.
pub fn delete_favorite(kind: FavoriteKind) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 AND {} = $2 RETURNING {}",
        quoted(kind.table()),
        quoted("user_id"),
        quoted(kind.target_column()),
        favorite_column_list(kind)
    )
}
