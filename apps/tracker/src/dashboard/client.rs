//! HTTP client for the `/applications` API.
//!
//! Every call carries the owner's bearer token. Non-2xx responses are
//! decoded from the `{error}` body into `ClientError::Api`.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::applications::validation::{describe, FieldError};
use crate::models::{Application, ApplicationPayload, ApplicationUpdate};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid form: {}", describe(.0))]
    Validation(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct TrackerClient {
    client: Client,
    base_url: String,
    token: String,
}

impl TrackerClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/applications", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        debug!("API call failed with {status}: {message}");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn list(&self) -> Result<Vec<Application>, ClientError> {
        let response = self.send(self.client.get(self.endpoint())).await?;
        Ok(response.json().await?)
    }

    pub async fn create(&self, payload: &ApplicationPayload) -> Result<Application, ClientError> {
        let response = self
            .send(self.client.post(self.endpoint()).json(payload))
            .await?;
        Ok(response.json().await?)
    }

    /// Returns the server's pre-update snapshot.
    pub async fn update(
        &self,
        id: Uuid,
        payload: &ApplicationPayload,
    ) -> Result<Application, ClientError> {
        let body = ApplicationUpdate {
            id,
            fields: payload.clone(),
        };
        let response = self
            .send(self.client.put(self.endpoint()).json(&body))
            .await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.send(
            self.client
                .delete(self.endpoint())
                .query(&[("id", id.to_string())]),
        )
        .await?;
        Ok(())
    }
}
