//! MattermostClient -- concrete [`HostApi`] implementation over the REST API v4.
//!
//! Every request carries the access token as a bearer header. The token is
//! wrapped in [`secrecy::SecretString`] and is never logged or included in
//! `Debug` output.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use sharepost_core::host::api::HostApi;
use sharepost_types::channel::Channel;
use sharepost_types::dialog::OpenDialogRequest;
use sharepost_types::error::HostError;
use sharepost_types::post::{Post, PostList};
use sharepost_types::team::{Team, User};

use super::types::{EphemeralPostRequest, FileInfo, FileUploadResponse, MattermostErrorBody};

/// Header carrying the server version on every response.
const VERSION_HEADER: &str = "X-Version-Id";

/// REST client bound to one Mattermost server and one access token.
pub struct MattermostClient {
    client: reqwest::Client,
    server_url: String,
    token: SecretString,
}

impl std::fmt::Debug for MattermostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MattermostClient")
            .field("server_url", &self.server_url)
            .finish_non_exhaustive()
    }
}

impl MattermostClient {
    /// Create a client for the server reachable at `server_url`.
    pub fn new(server_url: impl Into<String>, token: SecretString) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| HostError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            server_url: server_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Build the full API URL for a path below `/api/v4`.
    fn url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.server_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(self.token.expose_secret())
    }

    /// Send a request and map non-success statuses to [`HostError`].
    async fn send(
        &self,
        builder: RequestBuilder,
        resource: &'static str,
        id: &str,
    ) -> Result<Response, HostError> {
        let response = builder
            .send()
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(%status, resource, id, "mattermost request failed");
        if status == StatusCode::NOT_FOUND {
            return Err(HostError::NotFound {
                resource,
                id: id.to_string(),
            });
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MattermostErrorBody>(&text)
            .map(|body| body.message)
            .ok()
            .filter(|message| !message.is_empty())
            .unwrap_or(text);
        Err(HostError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, HostError> {
        response
            .json::<T>()
            .await
            .map_err(|e| HostError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
        id: &str,
    ) -> Result<T, HostError> {
        let response = self.send(self.request(Method::GET, path), resource, id).await?;
        Self::decode(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        resource: &'static str,
        id: &str,
    ) -> Result<T, HostError> {
        let response = self
            .send(self.request(method, path).json(body), resource, id)
            .await?;
        Self::decode(response).await
    }

    /// The server version reported by `GET /system/ping`, e.g. `"9.11.0.10230.abc.true"`.
    pub async fn server_version(&self) -> Result<String, HostError> {
        let response = self
            .send(self.request(Method::GET, "/system/ping"), "system", "ping")
            .await?;

        response
            .headers()
            .get(VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| HostError::Decode(format!("missing {VERSION_HEADER} header")))
    }

    /// Ask the server to show a dialog to the user owning `request.trigger_id`.
    pub async fn open_dialog(&self, request: &OpenDialogRequest) -> Result<(), HostError> {
        let trigger = request.trigger_id.as_deref().unwrap_or_default();
        self.send(
            self.request(Method::POST, "/actions/dialogs/open").json(request),
            "dialog trigger",
            trigger,
        )
        .await?;
        Ok(())
    }

    /// Download one file and upload it again into `channel_id`.
    async fn copy_file(&self, file_id: &str, channel_id: &str) -> Result<String, HostError> {
        let info: FileInfo = self
            .get_json(&format!("/files/{file_id}/info"), "file", file_id)
            .await?;

        let bytes = self
            .send(self.request(Method::GET, &format!("/files/{file_id}")), "file", file_id)
            .await?
            .bytes()
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let mut part = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(info.name.clone());
        if !info.mime_type.is_empty() {
            part = part
                .mime_str(&info.mime_type)
                .map_err(|e| HostError::Decode(e.to_string()))?;
        }
        let form = reqwest::multipart::Form::new()
            .text("channel_id", channel_id.to_string())
            .part("files", part);

        let response = self
            .send(self.request(Method::POST, "/files").multipart(form), "channel", channel_id)
            .await?;
        let uploaded: FileUploadResponse = Self::decode(response).await?;

        uploaded
            .file_infos
            .into_iter()
            .next()
            .map(|info| info.id)
            .ok_or_else(|| HostError::Decode(format!("upload of file {file_id} returned no file info")))
    }
}

impl HostApi for MattermostClient {
    async fn get_channel(&self, channel_id: &str) -> Result<Channel, HostError> {
        self.get_json(&format!("/channels/{channel_id}"), "channel", channel_id)
            .await
    }

    async fn get_team(&self, team_id: &str) -> Result<Team, HostError> {
        self.get_json(&format!("/teams/{team_id}"), "team", team_id)
            .await
    }

    async fn get_user(&self, user_id: &str) -> Result<User, HostError> {
        self.get_json(&format!("/users/{user_id}"), "user", user_id)
            .await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, HostError> {
        self.get_json(&format!("/posts/{post_id}"), "post", post_id)
            .await
    }

    async fn get_post_thread(&self, post_id: &str) -> Result<PostList, HostError> {
        let mut thread: PostList = self
            .get_json(&format!("/posts/{post_id}/thread"), "post", post_id)
            .await?;
        thread.unique_order();
        Ok(thread)
    }

    async fn create_post(&self, post: &Post) -> Result<Post, HostError> {
        self.send_json(Method::POST, "/posts", post, "channel", &post.channel_id)
            .await
    }

    async fn update_post(&self, post: &Post) -> Result<Post, HostError> {
        self.send_json(
            Method::PUT,
            &format!("/posts/{}", post.id),
            post,
            "post",
            &post.id,
        )
        .await
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), HostError> {
        self.send(
            self.request(Method::DELETE, &format!("/posts/{post_id}")),
            "post",
            post_id,
        )
        .await?;
        Ok(())
    }

    async fn copy_file_infos(
        &self,
        _user_id: &str,
        file_ids: &[String],
        channel_id: &str,
    ) -> Result<Vec<String>, HostError> {
        let mut copies = Vec::with_capacity(file_ids.len());
        for file_id in file_ids {
            copies.push(self.copy_file(file_id, channel_id).await?);
        }
        Ok(copies)
    }

    async fn send_ephemeral_post(&self, user_id: &str, post: &Post) -> Result<(), HostError> {
        let body = EphemeralPostRequest { user_id, post };
        self.send(
            self.request(Method::POST, "/posts/ephemeral").json(&body),
            "user",
            user_id,
        )
        .await?;
        Ok(())
    }
}
