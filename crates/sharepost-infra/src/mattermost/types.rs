//! Mattermost-specific request/response shapes that never leave this adapter.

use serde::{Deserialize, Serialize};

use sharepost_types::post::Post;

/// Body of `POST /api/v4/posts/ephemeral`.
#[derive(Debug, Serialize)]
pub struct EphemeralPostRequest<'a> {
    pub user_id: &'a str,
    pub post: &'a Post,
}

/// Metadata of an uploaded file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
}

/// Response of `POST /api/v4/files`.
#[derive(Debug, Deserialize)]
pub struct FileUploadResponse {
    #[serde(default)]
    pub file_infos: Vec<FileInfo>,
}

/// Error body the server returns on failed requests.
#[derive(Debug, Default, Deserialize)]
pub struct MattermostErrorBody {
    #[serde(default)]
    pub message: String,
}
