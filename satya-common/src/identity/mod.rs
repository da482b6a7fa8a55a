//! Identity providers
//!
//! One [`IdentityProvider`] trait, two implementations:
//! - [`MockIdentityProvider`]: local credential store in satya.db
//! - [`FirebaseIdentityProvider`]: Firebase Identity Toolkit REST API
//!
//! The implementation is chosen once, at construction, by
//! [`build_identity_provider`]. Callers hold an `Arc<dyn IdentityProvider>`
//! and never branch on which one they got.

mod firebase;
mod mock;

pub use firebase::FirebaseIdentityProvider;
pub use mock::MockIdentityProvider;

use crate::config::TomlConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, RwLock};
use tracing::info;

/// Capacity of the auth event channel
const AUTH_EVENT_CAPACITY: usize = 64;

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LEN: usize = 6;

/// Lifetime of a session token; matches a Firebase ID token
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
}

/// A signed-in session; `token` is presented as a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserIdentity,
}

/// Auth state change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(UserIdentity),
    SignedOut(UserIdentity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mock,
    Firebase,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Mock => f.write_str("mock"),
            ProviderKind::Firebase => f.write_str("firebase"),
        }
    }
}

impl ProviderKind {
    /// Message shown when an analysis is attempted without an identity
    pub fn auth_required_message(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "Mock authentication failed. Please try signing up again.",
            ProviderKind::Firebase => "You must be logged in to perform analysis",
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Prepare backing storage or connections
    async fn init(&self) -> Result<()>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Resolve the caller's identity from an optional session token
    async fn current_user(&self, token: Option<&str>) -> Option<UserIdentity>;

    async fn sign_out(&self, token: &str) -> Result<()>;

    /// Subscribe to sign-in/sign-out notifications
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Construct the provider selected by configuration
///
/// Firebase when a real API key is configured, mock otherwise. The mock
/// provider opens (or creates) satya.db under the root folder.
pub async fn build_identity_provider(config: &TomlConfig) -> Result<Arc<dyn IdentityProvider>> {
    let provider: Arc<dyn IdentityProvider> = if config.auth.firebase_configured() {
        info!("Identity provider: Firebase ({})", config.auth.firebase_base_url);
        Arc::new(FirebaseIdentityProvider::from_config(&config.auth)?)
    } else {
        info!("Identity provider: mock (Firebase API key not configured)");
        let pool = crate::db::init_database(&config.database_path()).await?;
        Arc::new(MockIdentityProvider::new(
            pool,
            config.auth.mock_anonymous_fallback,
        ))
    };

    provider.init().await?;
    Ok(provider)
}

/// Shared credential checks applied before any backend call
pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
    let email = email.trim();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    };
    if !valid_email {
        return Err(Error::InvalidInput(format!("Invalid email address: '{}'", email)));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::WeakPassword(format!(
            "Password should be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Cached session: the user plus the instant the token stops being honoured
struct CachedSession {
    user: UserIdentity,
    expires_at: Instant,
}

impl CachedSession {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Token -> user map shared by both providers, plus the event channel
///
/// Entries expire after their TTL; expired entries are dropped on lookup and
/// swept whenever a new session is stored.
pub(crate) struct SessionStore {
    sessions: RwLock<HashMap<String, CachedSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl SessionStore {
    pub(crate) fn new() -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            sessions: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// Store a session opened by sign-up or sign-in and announce it
    pub(crate) async fn open(&self, token: String, user: UserIdentity, ttl: Duration) -> Session {
        self.insert(token.clone(), user.clone(), ttl).await;
        // No subscribers is fine
        let _ = self.events.send(AuthEvent::SignedIn(user.clone()));
        Session { token, user }
    }

    /// Cache a user resolved from an existing token, without an event
    pub(crate) async fn remember(&self, token: String, user: UserIdentity, ttl: Duration) {
        self.insert(token, user, ttl).await;
    }

    async fn insert(&self, token: String, user: UserIdentity, ttl: Duration) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.is_live(now));
        sessions.insert(
            token,
            CachedSession {
                user,
                expires_at: now + ttl,
            },
        );
    }

    pub(crate) async fn get(&self, token: &str) -> Option<UserIdentity> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if session.is_live(now) => return Some(session.user.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    pub(crate) async fn close(&self, token: &str) -> Option<UserIdentity> {
        let session = self.sessions.write().await.remove(token)?;
        let _ = self.events.send(AuthEvent::SignedOut(session.user.clone()));
        Some(session.user)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("a@b.com", "secret1").is_ok());
        assert!(matches!(
            validate_credentials("nobody", "secret1"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            validate_credentials("@b.com", "secret1"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            validate_credentials("a@b.com", "12345"),
            Err(Error::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_session_store_events() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        let user = UserIdentity {
            uid: "u1".into(),
            email: "a@b.com".into(),
            email_verified: false,
        };

        store.open("t1".into(), user.clone(), DEFAULT_SESSION_TTL).await;
        assert_eq!(store.get("t1").await, Some(user.clone()));
        assert_eq!(rx.recv().await.unwrap(), AuthEvent::SignedIn(user.clone()));

        assert_eq!(store.close("t1").await, Some(user.clone()));
        assert_eq!(rx.recv().await.unwrap(), AuthEvent::SignedOut(user));
        assert!(store.get("t1").await.is_none());
        assert!(store.close("t1").await.is_none());
    }

    fn user(uid: &str) -> UserIdentity {
        UserIdentity {
            uid: uid.into(),
            email: format!("{}@b.com", uid),
            email_verified: false,
        }
    }

    #[tokio::test]
    async fn test_session_store_expires_and_sweeps() {
        let store = SessionStore::new();

        store.open("stale".into(), user("u1"), Duration::ZERO).await;
        assert!(store.get("stale").await.is_none());
        assert_eq!(store.len().await, 0);

        store.open("old".into(), user("u2"), Duration::ZERO).await;
        store.open("fresh".into(), user("u3"), DEFAULT_SESSION_TTL).await;
        // Storing "fresh" swept "old"
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("fresh").await, Some(user("u3")));
    }

    #[tokio::test]
    async fn test_session_store_remember_is_silent() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.remember("t1".into(), user("u1"), DEFAULT_SESSION_TTL).await;
        assert_eq!(store.get("t1").await, Some(user("u1")));
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
