//! Message action handler: opens the share dialog for an out-of-process host.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Value, json};

use sharepost_core::host::api::HostApi;
use sharepost_core::host::state::StateSnapshot;
use sharepost_core::plugin::SharePostAction;
use sharepost_types::dialog::PostActionRequest;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /actions/share
///
/// Runs the "Share post" action for `post_id`. The dialog is opened in the
/// background; the reply never waits for it.
pub async fn trigger_share<H: HostApi + 'static>(
    State(state): State<AppState<H>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request: PostActionRequest = serde_json::from_slice(&body)?;
    if request.post_id.is_empty() || request.trigger_id.is_empty() {
        return Err(AppError::BadRequest);
    }

    let channel = if request.channel_id.is_empty() {
        None
    } else {
        match state.host.get_channel(&request.channel_id).await {
            Ok(channel) => Some(channel),
            Err(e) => {
                tracing::debug!(channel_id = %request.channel_id, error = %e, "current channel unavailable");
                None
            }
        }
    };

    let snapshot = StateSnapshot::new(Some(state.client_config.clone()), channel);
    let action = SharePostAction::new(snapshot, (state.openers)(&request.trigger_id));
    action.invoke(&request.post_id);

    Ok(Json(json!({})))
}
