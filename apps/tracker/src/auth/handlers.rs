use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
    pub email: String,
    pub expires_in: Option<u64>,
}

/// GET /auth/signin
pub async fn handle_signin(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let url = state.oauth.authorize_url()?;
    Ok(Redirect::to(url.as_str()))
}

/// GET /auth/callback
///
/// Completes the authorization-code flow. Only the owner gets a token back;
/// the dashboard then sends it as its bearer token.
pub async fn handle_callback(
    State(state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Json<SignInResponse>, AppError> {
    let Query(query) = query?;
    if let Some(error) = query.error {
        warn!("Sign-in aborted by provider: {error}");
        return Err(AppError::Unauthorized);
    }
    let code = query
        .code
        .ok_or_else(|| AppError::Validation("code is required".to_string()))?;

    let token = state.oauth.exchange_code(&code).await?;
    let email = state.identity.resolve(&token.access_token).await?;
    if !state.guard.allows(email.as_deref()) {
        warn!("Sign-in refused for non-owner account");
        return Err(AppError::Unauthorized);
    }

    info!("Owner signed in");
    Ok(Json(SignInResponse {
        access_token: token.access_token,
        email: state.guard.owner_email().to_string(),
        expires_in: token.expires_in,
    }))
}
