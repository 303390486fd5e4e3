//! Hosted email/password identity provider client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the identity provider REST API.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL, e.g. `"https://identitytoolkit.googleapis.com"`.
    pub base_url: String,

    /// Project API key sent in the query string.
    pub api_key: String,
}

/// Account returned by a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAccount {
    /// Provider-side user identifier.
    pub user_id: String,

    /// Email as recorded by the provider.
    pub email: String,
}

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("email is already registered with the identity provider")]
    EmailExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("password is too weak")]
    WeakPassword,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an email/password account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError>;

    /// Check an email/password pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError>;
}

/// HTTP client for the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    config: IdentityConfig,
    http: Client,
}

impl IdentityClient {
    #[must_use]
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentityAccount, IdentityError> {
        let url = format!(
            "{}/v1/accounts:{endpoint}",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(classify_failure(status.as_u16(), &text));
        }

        let parsed: AccountResponse = response.json().await?;

        Ok(IdentityAccount {
            user_id: parsed.local_id,
            email: parsed.email,
        })
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError> {
        self.call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError> {
        self.call("signInWithPassword", email, password).await
    }
}

/// Map the provider's error codes onto [`IdentityError`].
fn classify_failure(status: u16, body: &str) -> IdentityError {
    let code = serde_json::from_str::<ErrorResponse>(body)
        .map(|response| response.error.message)
        .unwrap_or_default();

    // Codes may carry a detail suffix, e.g. "WEAK_PASSWORD : Password should be ..."
    match code.split([' ', ':']).next().unwrap_or_default() {
        "EMAIL_EXISTS" => IdentityError::EmailExists,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            IdentityError::InvalidCredentials
        }
        "WEAK_PASSWORD" => IdentityError::WeakPassword,
        _ => IdentityError::UnexpectedResponse(format!(
            "request failed with status {status}: {body}"
        )),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
