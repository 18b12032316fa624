use std::sync::Arc;

use crate::applications::store::ApplicationStore;
use crate::auth::guard::AccessGuard;
use crate::auth::identity::IdentityProvider;
use crate::auth::oauth::OAuthClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn ApplicationStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub guard: AccessGuard,
    pub oauth: OAuthClient,
}
