//! `MessageWillBePosted` hook handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;

use sharepost_core::host::api::HostApi;
use sharepost_types::post::Post;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /hooks/message_will_be_posted
///
/// Receives a post before the host stores it and returns the post to store.
pub async fn message_will_be_posted<H: HostApi + 'static>(
    State(state): State<AppState<H>>,
    body: Bytes,
) -> Result<Json<Post>, AppError> {
    let post: Post = serde_json::from_slice(&body)?;
    Ok(Json(state.permalink.message_will_be_posted(post).await))
}
