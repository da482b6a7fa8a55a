//! Identity endpoints
//!
//! Sessions are carried as `Authorization: Bearer <token>`. The extractor
//! never rejects: a missing header yields `BearerToken(None)` and the
//! identity provider decides what an absent token means.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use satya_common::identity::{Session, UserIdentity};
use serde::Deserialize;
use std::convert::Infallible;
use tracing::info;

use super::{ApiError, ApiResult};
use crate::AppState;

/// Optional bearer token from the Authorization header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        Ok(BearerToken(token))
    }
}

/// Sign-up / sign-in request body
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Session>)> {
    let Json(credentials) = payload?;

    let session = state
        .identity()
        .sign_up(&credentials.email, &credentials.password)
        .await?;
    info!(uid = %session.user.uid, "Account created");

    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/auth/login
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<Session>> {
    let Json(credentials) = payload?;

    let session = state
        .identity()
        .sign_in(&credentials.email, &credentials.password)
        .await?;
    info!(uid = %session.user.uid, "Signed in");

    Ok(Json(session))
}

/// POST /api/auth/logout
pub async fn sign_out(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<StatusCode> {
    let token = token
        .as_deref()
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    state.identity().sign_out(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn current_user(
    State(state): State<AppState>,
    token: BearerToken,
) -> ApiResult<Json<UserIdentity>> {
    state
        .identity()
        .current_user(token.as_deref())
        .await
        .map(Json)
        .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))
}
