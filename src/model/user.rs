//! Users. The password hash lives only in [`UserCredentials`] and is never serialized.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub is_active: bool,
}

/// Row used by the auth gate.
#[derive(Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
}

/// Registration body.
#[derive(Deserialize, ToSchema)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// What the store persists for a new user: the password is already hashed.
pub struct UserInsert {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
}
