//! In-memory store with the same semantics as `PgStore`. Catalog rows are kept as JSON objects keyed by table.

use super::{duplicate_email, duplicate_favorite, target_not_found, user_not_found, Store};
use crate::error::AppError;
use crate::model::{
    Favorite, FavoriteKind, Resource, User, UserCredentials, UserFavorites, UserInsert,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    rows: HashMap<&'static str, Vec<Value>>,
    users: Vec<UserCredentials>,
    user_names: HashMap<i32, String>,
    favorites: Vec<Favorite>,
    sequences: HashMap<&'static str, i32>,
}

impl Tables {
    /// Serial ids start at 1 per table, like a PostgreSQL SERIAL column.
    fn next_id(&mut self, table: &'static str) -> i32 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }

    fn has_row(&self, table: &str, id: i32) -> bool {
        self.rows
            .get(table)
            .map(|rows| rows.iter().any(|r| row_id(r) == Some(id)))
            .unwrap_or(false)
    }

    fn has_user(&self, id: i32) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn user(&self, creds: &UserCredentials) -> User {
        User {
            id: creds.id,
            email: creds.email.clone(),
            name: self.user_names.get(&creds.id).cloned().unwrap_or_default(),
            is_active: creds.is_active,
        }
    }
}

fn row_id(row: &Value) -> Option<i32> {
    row.get("id").and_then(Value::as_i64).and_then(|n| i32::try_from(n).ok())
}

fn decode<T: Resource>(row: &Value) -> Result<T, AppError> {
    serde_json::from_value(row.clone())
        .map_err(|e| AppError::Internal(format!("corrupt {} row: {}", T::TABLE, e)))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.tables().map(|_| ())
    }

    async fn list<T: Resource>(&self) -> Result<Vec<T>, AppError> {
        let tables = self.tables()?;
        tables
            .rows
            .get(T::TABLE)
            .map(|rows| rows.iter().map(decode::<T>).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn find<T: Resource>(&self, id: i32) -> Result<Option<T>, AppError> {
        let tables = self.tables()?;
        tables
            .rows
            .get(T::TABLE)
            .and_then(|rows| rows.iter().find(|r| row_id(r) == Some(id)))
            .map(decode::<T>)
            .transpose()
    }

    async fn create<T: Resource>(&self, new: T::New) -> Result<T, AppError> {
        let mut row = serde_json::to_value(&new)
            .map_err(|e| AppError::Internal(format!("encode {} row: {}", T::TABLE, e)))?;
        let mut tables = self.tables()?;
        let id = tables.next_id(T::TABLE);
        if let Value::Object(map) = &mut row {
            map.insert("id".into(), Value::from(id));
        }
        let created = decode::<T>(&row)?;
        tables.rows.entry(T::TABLE).or_default().push(row);
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().map(|c| tables.user(c)).collect())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.id == id).map(|c| tables.user(c)))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: UserInsert) -> Result<User, AppError> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(duplicate_email());
        }
        let id = tables.next_id("user");
        let creds = UserCredentials {
            id,
            email: user.email,
            password_hash: user.password_hash,
            is_active: user.is_active,
        };
        tables.user_names.insert(id, user.name);
        let created = tables.user(&creds);
        tables.users.push(creds);
        Ok(created)
    }

    async fn favorites_of(&self, user_id: i32) -> Result<Option<UserFavorites>, AppError> {
        let tables = self.tables()?;
        if !tables.has_user(user_id) {
            return Ok(None);
        }
        let mut out = UserFavorites::default();
        for fav in tables.favorites.iter().filter(|f| f.user_id == user_id) {
            out.push(fav.clone());
        }
        Ok(Some(out))
    }

    async fn add_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<Favorite, AppError> {
        let mut tables = self.tables()?;
        if !tables.has_user(user_id) {
            return Err(user_not_found(user_id));
        }
        if !tables.has_row(kind.target_table(), target_id) {
            return Err(target_not_found(kind, target_id));
        }
        let duplicate = tables
            .favorites
            .iter()
            .any(|f| f.kind == kind && f.user_id == user_id && f.target_id == target_id);
        if duplicate {
            return Err(duplicate_favorite(kind, user_id, target_id));
        }
        let favorite = Favorite {
            id: tables.next_id(kind.table()),
            user_id,
            kind,
            target_id,
        };
        tables.favorites.push(favorite.clone());
        Ok(favorite)
    }

    async fn remove_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<Option<Favorite>, AppError> {
        let mut tables = self.tables()?;
        let pos = tables
            .favorites
            .iter()
            .position(|f| f.kind == kind && f.user_id == user_id && f.target_id == target_id);
        Ok(pos.map(|i| tables.favorites.remove(i)))
    }
}
