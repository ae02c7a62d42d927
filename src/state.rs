use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::database::CastingStore;

/// Shared, immutable request context handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CastingStore>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn CastingStore>, verifier: Arc<TokenVerifier>) -> Self {
        Self { store, verifier }
    }
}
