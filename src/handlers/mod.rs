//! HTTP handlers for catalog entities, users, favorites and token issuance.

pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod users;
