//! Mock identity provider
//!
//! Local credential store for development without Firebase. Users live in
//! the `mock_users` table; passwords are stored as salted SHA-256, never in
//! the clear. Sessions are in-memory, expire after the session TTL (one hour
//! by default) and end with the process.
//!
//! With `anonymous_fallback` enabled, a caller with no (or an unknown) token
//! resolves to one synthetic `mock-user-<millis>` identity created when the
//! provider is constructed.

use super::{
    validate_credentials, AuthEvent, IdentityProvider, ProviderKind, Session, SessionStore,
    UserIdentity, DEFAULT_SESSION_TTL,
};
use crate::{Error, Result};
use async_trait::async_trait;
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

/// Email reported by the anonymous fallback identity
pub const MOCK_ANONYMOUS_EMAIL: &str = "mock@example.com";

pub struct MockIdentityProvider {
    pool: SqlitePool,
    sessions: SessionStore,
    session_ttl: Duration,
    anonymous: Option<UserIdentity>,
}

impl MockIdentityProvider {
    pub fn new(pool: SqlitePool, anonymous_fallback: bool) -> Self {
        let anonymous = anonymous_fallback.then(|| UserIdentity {
            uid: format!("mock-user-{}", chrono::Utc::now().timestamp_millis()),
            email: MOCK_ANONYMOUS_EMAIL.to_string(),
            email_verified: false,
        });

        Self {
            pool,
            sessions: SessionStore::new(),
            session_ttl: DEFAULT_SESSION_TTL,
            anonymous,
        }
    }

    /// Override how long issued tokens stay valid
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Registered emails, oldest first
    pub async fn list_users(&self) -> Result<Vec<String>> {
        let emails = sqlx::query_scalar::<_, String>(
            "SELECT email FROM mock_users ORDER BY created_at, email",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(emails)
    }

    fn new_uid() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "mock-user-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            &suffix[..8]
        )
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn new_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Mock
    }

    async fn init(&self) -> Result<()> {
        crate::db::create_schema(&self.pool).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        validate_credentials(email, password)?;
        let email = normalize_email(email);
        debug!("Mock: creating user {}", email);

        let exists: Option<String> =
            sqlx::query_scalar("SELECT uid FROM mock_users WHERE email = ?")
                .bind(&email)
                .fetch_optional(&self.pool)
                .await?;
        if exists.is_some() {
            return Err(Error::EmailInUse);
        }

        let uid = Self::new_uid();
        let salt = new_salt();
        let inserted = sqlx::query(
            "INSERT INTO mock_users (email, uid, password_salt, password_hash) VALUES (?, ?, ?, ?)",
        )
        .bind(&email)
        .bind(&uid)
        .bind(&salt)
        .bind(hash_password(&salt, password))
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => {}
            // Lost a race with a concurrent sign-up for the same email
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(Error::EmailInUse)
            }
            Err(e) => return Err(e.into()),
        }

        info!("Mock: user {} created", email);

        let user = UserIdentity {
            uid,
            email,
            email_verified: false,
        };
        Ok(self.sessions
            .open(Uuid::new_v4().to_string(), user, self.session_ttl)
            .await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        debug!("Mock: signing in {}", email);

        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT uid, password_salt, password_hash FROM mock_users WHERE email = ?",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let (uid, salt, stored_hash) = row.ok_or(Error::UserNotFound)?;
        if hash_password(&salt, password) != stored_hash {
            debug!("Mock: password mismatch for {}", email);
            return Err(Error::WrongPassword);
        }

        let user = UserIdentity {
            uid,
            email,
            email_verified: false,
        };
        Ok(self.sessions
            .open(Uuid::new_v4().to_string(), user, self.session_ttl)
            .await)
    }

    async fn current_user(&self, token: Option<&str>) -> Option<UserIdentity> {
        if let Some(token) = token {
            if let Some(user) = self.sessions.get(token).await {
                return Some(user);
            }
        }
        self.anonymous.clone()
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        if let Some(user) = self.sessions.close(token).await {
            info!("Mock: {} signed out", user.email);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sessions.subscribe()
    }
}
