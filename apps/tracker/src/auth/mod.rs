//! Authentication and single-owner authorization.
//!
//! Requests carry `Authorization: Bearer <access token>`. The token is
//! resolved to an email by the `IdentityProvider`, then checked by the
//! `AccessGuard`. Handlers that take an `Owner` argument never run for
//! anyone else.

pub mod guard;
pub mod handlers;
pub mod identity;
pub mod oauth;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// Proof that the caller is the owner. Extracted before the body, so a
/// rejected caller never reaches validation or the store.
#[derive(Debug, Clone)]
pub struct Owner {
    pub email: String,
}

/// Returns the token of a `Bearer` authorization header, if any.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let identity = match bearer_token(parts) {
            Some(token) => state.identity.resolve(token).await?,
            None => None,
        };

        if let Err(e) = state.guard.check(identity.as_deref()) {
            debug!("Rejected {} {}", parts.method, parts.uri.path());
            return Err(e);
        }

        Ok(Owner {
            email: identity.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/applications");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsed() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts_with(Some("bearer abc"))), Some("abc"));
    }

    #[test]
    fn test_non_bearer_schemes_ignored() {
        assert_eq!(bearer_token(&parts_with(Some("Basic dXNlcg=="))), None);
        assert_eq!(bearer_token(&parts_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}
