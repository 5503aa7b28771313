//! Requesting-user extractor.
//!
//! The host forwards plugin requests with the id of the signed-in user in the
//! `Mattermost-User-Id` header; requests without it are rejected.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;

pub const USER_ID_HEADER: &str = "Mattermost-User-Id";

/// Id of the user the host authenticated for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MattermostUserId(pub String);

impl<S: Send + Sync> FromRequestParts<S> for MattermostUserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| MattermostUserId(id.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
