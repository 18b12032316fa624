//! Identity resolution: turns an OAuth access token into a verified email.
//!
//! The tracker never checks credentials itself. It trusts the `email` claim
//! of the identity provider, and only when the provider marks it verified.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the verified email behind `access_token`, or `None` when the
    /// provider does not recognise the token.
    async fn resolve(&self, access_token: &str) -> Result<Option<String>, AppError>;
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

/// Google OpenID Connect userinfo lookup.
#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: Client,
    userinfo_url: String,
}

impl GoogleIdentityProvider {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_endpoint(GOOGLE_USERINFO_URL)
    }

    pub fn with_endpoint(userinfo_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            userinfo_url: userinfo_url.into(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn resolve(&self, access_token: &str) -> Result<Option<String>, AppError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Identity provider rejected access token");
                return Ok(None);
            }
            status if !status.is_success() => {
                return Err(AppError::Identity(format!(
                    "userinfo returned status {status}"
                )));
            }
            _ => {}
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        if !info.email_verified {
            warn!("Identity provider returned an unverified email");
            return Ok(None);
        }
        Ok(info.email)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, routing::get, Json, Router};
    use serde_json::{json, Value};

    /// Serves a userinfo endpoint on an ephemeral port.
    async fn spawn_userinfo() -> String {
        async fn userinfo(headers: HeaderMap) -> Result<Json<Value>, axum::http::StatusCode> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            match auth {
                "Bearer good" => Ok(Json(json!({
                    "sub": "1",
                    "email": "owner@example.com",
                    "email_verified": true
                }))),
                "Bearer unverified" => Ok(Json(json!({
                    "sub": "2",
                    "email": "owner@example.com",
                    "email_verified": false
                }))),
                "Bearer broken" => Err(axum::http::StatusCode::BAD_GATEWAY),
                _ => Err(axum::http::StatusCode::UNAUTHORIZED),
            }
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/userinfo", get(userinfo));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/userinfo")
    }

    #[tokio::test]
    async fn test_verified_email_resolved() {
        let provider = GoogleIdentityProvider::with_endpoint(spawn_userinfo().await).unwrap();
        let email = provider.resolve("good").await.unwrap();
        assert_eq!(email.as_deref(), Some("owner@example.com"));
    }

    #[tokio::test]
    async fn test_unverified_email_ignored() {
        let provider = GoogleIdentityProvider::with_endpoint(spawn_userinfo().await).unwrap();
        assert_eq!(provider.resolve("unverified").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_token_is_no_identity() {
        let provider = GoogleIdentityProvider::with_endpoint(spawn_userinfo().await).unwrap();
        assert_eq!(provider.resolve("stale").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_provider_failure_is_an_error() {
        let provider = GoogleIdentityProvider::with_endpoint(spawn_userinfo().await).unwrap();
        let err = provider.resolve("broken").await.unwrap_err();
        assert!(matches!(err, AppError::Identity(_)));
    }
}
