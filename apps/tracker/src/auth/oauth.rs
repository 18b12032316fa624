//! Google OAuth 2.0 authorization-code flow for the owner sign-in.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "openid email";

#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub authorize_url: String,
    pub token_url: String,
}

impl OAuthSettings {
    pub fn google(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_url,
            authorize_url: GOOGLE_AUTHORIZE_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

#[derive(Clone)]
pub struct OAuthClient {
    client: Client,
    settings: OAuthSettings,
}

impl OAuthClient {
    pub fn new(settings: OAuthSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            settings,
        })
    }

    /// The consent page the owner is redirected to.
    pub fn authorize_url(&self) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.settings.authorize_url)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("bad authorize url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE);
        Ok(url)
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .client
            .post(&self.settings.token_url)
            .form(&TokenRequest {
                code,
                client_id: &self.settings.client_id,
                client_secret: &self.settings.client_secret,
                redirect_uri: &self.settings.redirect_url,
                grant_type: "authorization_code",
            })
            .send()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            // Expired, reused or forged codes.
            return Err(AppError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AppError::Identity(format!(
                "token endpoint returned status {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Identity(e.to_string()))
    }
}
