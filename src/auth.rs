//! Admin client for the identity service's account-creation API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::import::AuthProvisioner;
use crate::models::UserRecord;

#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Identity service rejected the request
    #[error("identity service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Response did not carry a usable account id
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub struct AdminAuthClient {
    client: Client,
    base_url: String,
    service_role_key: String,
}

impl AdminAuthClient {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key.clone(),
        })
    }
}

#[derive(Deserialize)]
struct CreatedUser {
    id: Uuid,
}

#[async_trait]
impl AuthProvisioner for AdminAuthClient {
    /// Creates a pre-confirmed account so no verification email goes out.
    /// The legacy id travels along as metadata for later reconciliation.
    async fn create_account(&self, user: &UserRecord, password: &str) -> Result<Uuid, AuthError> {
        let url = format!("{}/auth/v1/admin/users", self.base_url);
        let body = json!({
            "email": user.email,
            "password": password,
            "email_confirm": true,
            "user_metadata": {
                "first_name": user.first_name,
                "last_name": user.last_name,
                "legacy_user_id": user.user_id,
            },
        });

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
            .header("apikey", &self.service_role_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(AuthError::Status { status, body });
        }

        let created: CreatedUser = response
            .json()
            .await
            .map_err(|err| AuthError::InvalidResponse(err.to_string()))?;

        Ok(created.id)
    }
}
