//! Shared application state for all routes.

use crate::service::TokenIssuer;
use crate::store::Store;
use std::sync::Arc;

pub struct AppState<S> {
    pub store: Arc<S>,
    pub tokens: Arc<TokenIssuer>,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, tokens: TokenIssuer) -> Self {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
        }
    }
}

// Manual impl: cloning the state never requires `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tokens: Arc::clone(&self.tokens),
        }
    }
}
