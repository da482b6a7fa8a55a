//! Submission orchestrator
//!
//! Glue between a raw analysis request and the engine:
//! 1. Build a [`ContentSubmission`] (kind/payload must agree)
//! 2. Reject blank payloads
//! 3. Require an identity from the injected [`IdentityProvider`]
//! 4. Optional simulated latency
//! 5. Evaluate and return the verdict

use crate::engine;
use crate::identity::{IdentityProvider, UserIdentity};
use crate::signals::{SignalAnalyzer, SignalReport};
use crate::submission::{ContentSubmission, SubmissionRequest};
use crate::verdict::CredibilityVerdict;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct Orchestrator {
    identity: Arc<dyn IdentityProvider>,
    signals: SignalAnalyzer,
    simulated_latency: Duration,
}

impl Orchestrator {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            signals: SignalAnalyzer::new(),
            simulated_latency: Duration::ZERO,
        }
    }

    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    /// Resolve the caller or fail with the provider's auth-required message
    pub async fn require_user(&self, token: Option<&str>) -> Result<UserIdentity> {
        self.identity.current_user(token).await.ok_or_else(|| {
            Error::AuthenticationRequired(self.identity.kind().auth_required_message().to_string())
        })
    }

    /// Run a credibility check for the caller holding `token`
    pub async fn check(
        &self,
        token: Option<&str>,
        request: SubmissionRequest,
    ) -> Result<CredibilityVerdict> {
        let submission = ContentSubmission::try_from(request)?;
        self.check_submission(token, &submission).await
    }

    pub async fn check_submission(
        &self,
        token: Option<&str>,
        submission: &ContentSubmission,
    ) -> Result<CredibilityVerdict> {
        if submission.is_blank() {
            return Err(Error::EmptySubmission);
        }

        let user = self.require_user(token).await?;

        info!(
            kind = %submission.kind(),
            uid = %user.uid,
            "Received analysis request: {}",
            submission.log_preview()
        );

        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }

        let verdict = engine::evaluate(submission);

        info!(
            kind = %verdict.kind(),
            rule = verdict.rule_name(),
            health_score = verdict.health_score(),
            "Analysis complete"
        );

        Ok(verdict)
    }

    /// Signal report for free text, same auth rules as [`Self::check`]
    pub async fn signals(&self, token: Option<&str>, text: &str) -> Result<SignalReport> {
        if text.trim().is_empty() {
            return Err(Error::EmptySubmission);
        }
        let user = self.require_user(token).await?;
        info!(uid = %user.uid, chars = text.chars().count(), "Signal analysis requested");
        Ok(self.signals.analyze(text))
    }
}
