//! Credibility check and signal report endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use satya_common::signals::SignalReport;
use satya_common::submission::SubmissionRequest;
use satya_common::CredibilityVerdict;
use serde::Deserialize;

use super::{ApiResult, BearerToken};
use crate::AppState;

/// POST /api/analyze
///
/// Body: `{"type": "text"|"url"|"image", "data": "...", "fileName": "..."}`
pub async fn analyze(
    State(state): State<AppState>,
    token: BearerToken,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> ApiResult<Json<CredibilityVerdict>> {
    let Json(request) = payload?;
    let verdict = state.orchestrator.check(token.as_deref(), request).await?;
    Ok(Json(verdict))
}

#[derive(Debug, Deserialize)]
pub struct SignalsRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /api/signals
pub async fn signals(
    State(state): State<AppState>,
    token: BearerToken,
    payload: Result<Json<SignalsRequest>, JsonRejection>,
) -> ApiResult<Json<SignalReport>> {
    let Json(request) = payload?;
    let report = state.orchestrator.signals(token.as_deref(), &request.text).await?;
    Ok(Json(report))
}
