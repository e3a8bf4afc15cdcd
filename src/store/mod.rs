//! Persistence seam. Handlers talk to a [`Store`]; `PgStore` backs production, `MemoryStore` backs tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Favorite, FavoriteKind, Resource, User, UserCredentials, UserFavorites, UserInsert};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Cheap round-trip used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;

    async fn list<T: Resource>(&self) -> Result<Vec<T>, AppError>;

    async fn find<T: Resource>(&self, id: i32) -> Result<Option<T>, AppError>;

    async fn create<T: Resource>(&self, new: T::New) -> Result<T, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, AppError>;

    /// Fails with `Conflict` when the email is already registered.
    async fn create_user(&self, user: UserInsert) -> Result<User, AppError>;

    /// `None` when the user does not exist.
    async fn favorites_of(&self, user_id: i32) -> Result<Option<UserFavorites>, AppError>;

    /// Atomically checks that both ends exist and the pair is new, then inserts.
    /// `NotFound` for a missing user or target, `Conflict` for a duplicate pair.
    async fn add_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<Favorite, AppError>;

    /// Returns the removed association, or `None` if there was nothing to remove.
    async fn remove_favorite(
        &self,
        kind: FavoriteKind,
        user_id: i32,
        target_id: i32,
    ) -> Result<Option<Favorite>, AppError>;
}

pub(crate) fn user_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("user {} not found", id))
}

pub(crate) fn target_not_found(kind: FavoriteKind, id: i32) -> AppError {
    AppError::NotFound(format!("{} {} not found", kind.label(), id))
}

pub(crate) fn duplicate_favorite(kind: FavoriteKind, user_id: i32, target_id: i32) -> AppError {
    AppError::Conflict(format!(
        "user {} already has {} {} as a favorite",
        user_id,
        kind.label(),
        target_id
    ))
}

pub(crate) fn duplicate_email() -> AppError {
    AppError::Conflict("email already registered".into())
}
