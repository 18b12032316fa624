pub mod health;

use axum::{routing::get, Router};

use crate::applications::handlers;
use crate::auth::handlers as auth;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Owner sign-in
        .route("/auth/signin", get(auth::handle_signin))
        .route("/auth/callback", get(auth::handle_callback))
        // Application records
        .route(
            "/applications",
            get(handlers::handle_list)
                .post(handlers::handle_create)
                .put(handlers::handle_update)
                .delete(handlers::handle_delete),
        )
        .with_state(state)
}
