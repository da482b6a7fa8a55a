//! Firebase identity provider
//!
//! Talks to the Identity Toolkit REST API (v1):
//! - `accounts:signUp` and `accounts:signInWithPassword` open a session whose
//!   token is the Firebase ID token
//! - `accounts:lookup` resolves ID tokens this process has not seen
//!
//! Sign-out only forgets the cached session, the same as the Firebase web
//! client, which never revokes tokens server-side.
//!
//! Cached sessions live for the `expiresIn` the backend reports. Tokens
//! resolved through `accounts:lookup` are cached for [`LOOKUP_CACHE_TTL`]
//! only, so revocation is picked up on the next lookup.

use super::{
    validate_credentials, AuthEvent, IdentityProvider, ProviderKind, Session, SessionStore,
    UserIdentity, DEFAULT_SESSION_TTL,
};
use crate::config::AuthConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a user resolved by `accounts:lookup` is trusted without asking again
pub const LOOKUP_CACHE_TTL: Duration = Duration::from_secs(300);

pub struct FirebaseIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    sessions: SessionStore,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    id_token: String,
    local_id: String,
    email: String,
    /// Token lifetime in seconds, sent as a string ("3600")
    #[serde(default)]
    expires_in: Option<String>,
}

impl AuthResponse {
    fn token_ttl(&self) -> Duration {
        self.expires_in
            .as_deref()
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SESSION_TTL)
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            sessions: SessionStore::new(),
        })
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let api_key = config
            .firebase_api_key
            .clone()
            .ok_or_else(|| Error::Config("Firebase API key not configured".to_string()))?;
        Self::new(config.firebase_base_url.clone(), api_key.trim())
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, method, self.api_key)
    }

    async fn call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.endpoint(method))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => Err(map_error_code(&envelope.error.message)),
            Err(_) => Err(Error::IdentityBackend(format!(
                "accounts:{} returned {}: {}",
                method, status, text
            ))),
        }
    }

    async fn authenticate(&self, method: &str, email: &str, password: &str) -> Result<Session> {
        let response: AuthResponse = self
            .call(
                method,
                json!({
                    "email": email.trim(),
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let ttl = response.token_ttl();
        let user = UserIdentity {
            uid: response.local_id,
            email: response.email,
            email_verified: false,
        };
        Ok(self.sessions.open(response.id_token, user, ttl).await)
    }
}

/// Map an Identity Toolkit error message to a crate error
///
/// Messages look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be
/// at least 6 characters`.
pub(crate) fn map_error_code(message: &str) -> Error {
    let code = message.split(':').next().unwrap_or(message).trim();
    match code {
        "EMAIL_EXISTS" => Error::EmailInUse,
        "EMAIL_NOT_FOUND" | "USER_DISABLED" => Error::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => Error::WrongPassword,
        "WEAK_PASSWORD" => Error::WeakPassword(
            message
                .split_once(':')
                .map(|(_, detail)| detail.trim().to_string())
                .unwrap_or_else(|| message.to_string()),
        ),
        "INVALID_EMAIL" | "MISSING_PASSWORD" | "MISSING_EMAIL" => {
            Error::InvalidInput(message.to_string())
        }
        _ => Error::IdentityBackend(message.to_string()),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Firebase
    }

    async fn init(&self) -> Result<()> {
        info!("Firebase identity provider ready ({})", self.base_url);
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;
        self.authenticate("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.authenticate("signInWithPassword", email, password).await
    }

    async fn current_user(&self, token: Option<&str>) -> Option<UserIdentity> {
        let token = token?;
        if let Some(user) = self.sessions.get(token).await {
            return Some(user);
        }

        let lookup: Result<LookupResponse> = self.call("lookup", json!({ "idToken": token })).await;
        match lookup {
            Ok(response) => {
                let found = response.users.into_iter().next()?;
                let user = UserIdentity {
                    uid: found.local_id,
                    email: found.email,
                    email_verified: found.email_verified,
                };
                self.sessions
                    .remember(token.to_string(), user.clone(), LOOKUP_CACHE_TTL)
                    .await;
                Some(user)
            }
            Err(e) => {
                warn!("Firebase token lookup failed: {}", e);
                None
            }
        }
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        if let Some(user) = self.sessions.close(token).await {
            info!("{} signed out", user.email);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sessions.subscribe()
    }
}
