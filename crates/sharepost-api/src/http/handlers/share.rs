//! Dialog submission handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use sharepost_core::host::api::HostApi;
use sharepost_types::dialog::SubmitDialogRequest;

use crate::http::error::AppError;
use crate::http::extractors::user::MattermostUserId;
use crate::state::AppState;

/// POST /api/v1/share
///
/// The host posts the filled share dialog here. A user-facing message is
/// delivered as an ephemeral post; a dialog response (field errors) is
/// returned as JSON; otherwise the reply is an empty 200.
pub async fn submit_share<H: HostApi + 'static>(
    State(state): State<AppState<H>>,
    MattermostUserId(user_id): MattermostUserId,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: SubmitDialogRequest = serde_json::from_slice(&body)?;
    if request.user_id != user_id {
        tracing::warn!(header_user = %user_id, body_user = %request.user_id, "submission user mismatch");
        return Err(AppError::Unauthorized);
    }

    let outcome = state.share_service.handle_submission(&request).await;

    if let Some(message) = &outcome.message {
        state
            .share_service
            .send_ephemeral_post(&request.channel_id, &user_id, message)
            .await;
    }

    Ok(match outcome.response {
        Some(response) => Json(response).into_response(),
        None => StatusCode::OK.into_response(),
    })
}
