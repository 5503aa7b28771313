//! Share/move submission service.
//!
//! Handles the payload the host POSTs when the user submits the share dialog.
//! `share` copies the post into the target channel as a quote with a
//! permalink; `move` re-creates the whole thread in the target channel and
//! turns the original root into a notice pointing at the new one.

use chrono::Utc;

use sharepost_types::dialog::{SubmitDialogRequest, SubmitDialogResponse};
use sharepost_types::error::{HostError, ShareError};
use sharepost_types::post::{POST_DEFAULT, POST_SYSTEM_GENERIC, Post};
use sharepost_types::share::{ADDITIONAL_TEXT_PROP, FORCE_SHARE_KEY, ShareSubmission, ShareType};

use crate::host::api::HostApi;
use crate::service::{MESSAGE_GENERIC_ERROR, make_post_link};

pub const MESSAGE_MOVE_REPLY: &str =
    "the post that has parent posts cannot be moved to other channel.";
pub const MESSAGE_MOVE_SAME_CHANNEL: &str = "cannot move the post to same channel.";
pub const MESSAGE_CONFIRM_REQUIRED: &str =
    "This channel is not public. Please confirm before sharing.";

/// What to tell the user after a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Sent as an ephemeral post in the channel the dialog was opened from.
    pub message: Option<String>,
    /// Returned to the host as the dialog response; field errors keep the
    /// dialog open.
    pub response: Option<SubmitDialogResponse>,
}

impl SubmitOutcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            response: None,
        }
    }

    pub fn response(response: SubmitDialogResponse) -> Self {
        Self {
            message: None,
            response: Some(response),
        }
    }
}

/// Service executing share and move requests against the host.
pub struct ShareService<H: HostApi> {
    host: H,
    site_url: String,
}

impl<H: HostApi> ShareService<H> {
    /// - `host`: the host API the posts are read from and written to
    /// - `site_url`: public `SiteURL`, used to build permalinks
    pub fn new(host: H, site_url: impl Into<String>) -> Self {
        Self {
            host,
            site_url: site_url.into(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle one dialog submission.
    ///
    /// Never fails: errors are logged and reported to the user as the
    /// generic error message.
    pub async fn handle_submission(&self, request: &SubmitDialogRequest) -> SubmitOutcome {
        if request.cancelled {
            return SubmitOutcome::default();
        }

        match self.try_handle_submission(request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    post_id = %request.callback_id,
                    error = %e,
                    "failed to handle share submission"
                );
                SubmitOutcome::message(MESSAGE_GENERIC_ERROR)
            }
        }
    }

    async fn try_handle_submission(
        &self,
        request: &SubmitDialogRequest,
    ) -> Result<SubmitOutcome, ShareError> {
        let submission = ShareSubmission::from_submission(&request.submission)?;

        if !submission.confirmed() {
            let source = self
                .host
                .get_channel(&request.channel_id)
                .await
                .map_err(ShareError::host("get channel"))?;
            if !source.is_open() {
                return Ok(SubmitOutcome::response(SubmitDialogResponse::field_error(
                    FORCE_SHARE_KEY,
                    MESSAGE_CONFIRM_REQUIRED,
                )));
            }
        }

        match submission.share_type {
            ShareType::Share => self.share_post(request, &submission).await,
            ShareType::Move => self.move_post(request, &submission).await,
        }
    }

    /// Copy the post into the target channel as a quote.
    pub async fn share_post(
        &self,
        request: &SubmitDialogRequest,
        submission: &ShareSubmission,
    ) -> Result<SubmitOutcome, ShareError> {
        let post_id = request.callback_id.as_str();

        let channel = self
            .host
            .get_channel(&request.channel_id)
            .await
            .map_err(ShareError::host("get channel"))?;
        let new_channel = self
            .host
            .get_channel(&submission.to_channel)
            .await
            .map_err(ShareError::host("get channel"))?;
        let team = self
            .host
            .get_team(&request.team_id)
            .await
            .map_err(ShareError::host("get team"))?;
        let thread = self
            .host
            .get_post_thread(post_id)
            .await
            .map_err(ShareError::host("get post list"))?;
        tracing::debug!(post_id, thread_len = thread.len(), "sharing post");

        let link = make_post_link(&self.site_url, &team.name, post_id);
        let mut new_post = Post {
            post_type: POST_DEFAULT.to_string(),
            user_id: request.user_id.clone(),
            channel_id: submission.to_channel.clone(),
            message: format!("> Shared from ~{}. ([original post]({link}))", channel.name),
            ..Post::default()
        };
        new_post.set_prop(ADDITIONAL_TEXT_PROP, submission.additional_text.clone());

        let created = self
            .host
            .create_post(&new_post)
            .await
            .map_err(ShareError::host("create post"))?;

        self.send_ephemeral_post(
            &request.channel_id,
            &request.user_id,
            &format!(
                "[This post]({link}) is shared to ~{}. [New post]({}).",
                new_channel.name,
                make_post_link(&self.site_url, &team.name, &created.id)
            ),
        )
        .await;

        Ok(SubmitOutcome::default())
    }

    /// Move the post, with its thread, into the target channel.
    ///
    /// Replies cannot be moved on their own. If re-creating any reply fails,
    /// every post created so far is deleted again and the original thread is
    /// left untouched.
    pub async fn move_post(
        &self,
        request: &SubmitDialogRequest,
        submission: &ShareSubmission,
    ) -> Result<SubmitOutcome, ShareError> {
        let post_id = request.callback_id.as_str();
        let user_id = request.user_id.as_str();
        let to_channel = submission.to_channel.as_str();

        let thread = self
            .host
            .get_post_thread(post_id)
            .await
            .map_err(ShareError::host("get post list"))?;
        let old_post = self
            .host
            .get_post(post_id)
            .await
            .map_err(ShareError::host("get post"))?;

        if thread.len() > 1 && old_post.is_reply() {
            tracing::warn!(post_id, "refusing to move a reply");
            return Ok(SubmitOutcome::message(MESSAGE_MOVE_REPLY));
        }
        if old_post.channel_id == to_channel {
            tracing::warn!(post_id, "refusing to move a post into its own channel");
            return Ok(SubmitOutcome::message(MESSAGE_MOVE_SAME_CHANNEL));
        }

        let new_channel = self
            .host
            .get_channel(to_channel)
            .await
            .map_err(ShareError::host("get channel"))?;
        let team = self
            .host
            .get_team(&request.team_id)
            .await
            .map_err(ShareError::host("get team"))?;

        let mut new_root = self.clone_post(&old_post, user_id, to_channel).await?;
        new_root.set_prop(ADDITIONAL_TEXT_PROP, submission.additional_text.clone());
        let moved_root = self
            .host
            .create_post(&new_root)
            .await
            .map_err(ShareError::host("create post"))?;
        tracing::debug!(post_id, moved_post_id = %moved_root.id, "created moved root post");

        let mut created_ids = vec![moved_root.id.clone()];
        let mut moved_children = Vec::new();
        for child in thread.sorted_by_create_at() {
            if child.id == post_id {
                continue;
            }
            match self.move_child(child, &moved_root, user_id).await {
                Ok(created) => {
                    created_ids.push(created.id);
                    moved_children.push(child.id.clone());
                }
                Err(e) => {
                    tracing::warn!(post_id = %child.id, error = %e, "failed to move reply, rolling back");
                    self.rollback(&created_ids).await.map_err(ShareError::Rollback)?;
                    return Err(e);
                }
            }
        }
        if !moved_children.is_empty() {
            tracing::debug!(post_id, replies = moved_children.len(), "moved thread");
        }

        let mut notice = old_post.clone();
        notice.post_type = POST_SYSTEM_GENERIC.to_string();
        notice.message = format!(
            "This post is moved to ~{}. [New post]({})",
            new_channel.name,
            make_post_link(&self.site_url, &team.name, &moved_root.id)
        );
        notice.file_ids.clear();
        notice.set_attachments(Vec::new());
        notice.metadata = None;
        if let Err(e) = self.host.update_post(&notice).await {
            tracing::warn!(post_id, error = %e, "failed to update moved post");
        }

        for id in &moved_children {
            if let Err(e) = self.host.delete_post(id).await {
                tracing::warn!(post_id = %id, error = %e, "failed to delete moved reply");
            }
        }

        Ok(SubmitOutcome::default())
    }

    async fn move_child(&self, child: &Post, new_root: &Post, user_id: &str) -> Result<Post, ShareError> {
        let mut post = self.clone_post(child, user_id, &new_root.channel_id).await?;
        post.root_id = new_root.id.clone();
        self.host
            .create_post(&post)
            .await
            .map_err(ShareError::host("create reply"))
    }

    /// A copy of `old` for `channel_id`, owning its own copies of the files.
    async fn clone_post(&self, old: &Post, user_id: &str, channel_id: &str) -> Result<Post, ShareError> {
        let mut post = old.duplicate();
        post.channel_id = channel_id.to_string();
        post.update_at = Utc::now().timestamp_millis();
        post.metadata = None;

        if !old.file_ids.is_empty() {
            post.file_ids = self
                .host
                .copy_file_infos(user_id, &old.file_ids, channel_id)
                .await
                .map_err(ShareError::host("copy file infos"))?;
        }
        Ok(post)
    }

    async fn rollback(&self, ids: &[String]) -> Result<(), HostError> {
        for id in ids {
            if let Err(e) = self.host.delete_post(id).await {
                tracing::warn!(post_id = %id, error = %e, "failed to delete post for rollback");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Show `message` to `user_id` only. Failures are logged and dropped.
    pub async fn send_ephemeral_post(&self, channel_id: &str, user_id: &str, message: &str) {
        let post = Post {
            channel_id: channel_id.to_string(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            ..Post::default()
        };
        if let Err(e) = self.host.send_ephemeral_post(user_id, &post).await {
            tracing::warn!(channel_id, user_id, error = %e, "failed to send ephemeral post");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::InMemoryHost;
    use serde_json::json;
    use sharepost_types::channel::{Channel, ChannelType};
    use sharepost_types::team::Team;

    const SITE: &str = "https://chat.co";

    fn channel(id: &str, name: &str, channel_type: ChannelType) -> Channel {
        Channel {
            id: id.to_string(),
            team_id: "t1".to_string(),
            name: name.to_string(),
            display_name: name.to_string(),
            channel_type,
        }
    }

    fn post(id: &str, root_id: &str, create_at: i64, message: &str) -> Post {
        Post {
            id: id.to_string(),
            root_id: root_id.to_string(),
            channel_id: "c1".to_string(),
            user_id: "author".to_string(),
            create_at,
            message: message.to_string(),
            ..Post::default()
        }
    }

    fn host() -> InMemoryHost {
        InMemoryHost::new()
            .with_channel(channel("c1", "town-square", ChannelType::Open))
            .with_channel(channel("c2", "random", ChannelType::Open))
            .with_channel(channel("c3", "secret", ChannelType::Private))
            .with_team(Team {
                id: "t1".to_string(),
                name: "eng".to_string(),
                display_name: "Engineering".to_string(),
            })
            .with_post(post("root", "", 10, "root message"))
            .with_post(post("reply1", "root", 20, "first reply"))
            .with_post(post("reply2", "root", 30, "second reply"))
    }

    fn request(post_id: &str, channel_id: &str, submission: serde_json::Value) -> SubmitDialogRequest {
        SubmitDialogRequest {
            callback_id: post_id.to_string(),
            user_id: "u1".to_string(),
            channel_id: channel_id.to_string(),
            team_id: "t1".to_string(),
            submission: submission.as_object().cloned().unwrap(),
            ..SubmitDialogRequest::default()
        }
    }

    #[tokio::test]
    async fn test_share_creates_quote_and_confirms() {
        let service = ShareService::new(host(), SITE);
        let req = request(
            "root",
            "c1",
            json!({"to_channel": "c2", "share_type": "share", "additional_text": "fyi"}),
        );

        let outcome = service.handle_submission(&req).await;
        assert_eq!(outcome, SubmitOutcome::default());

        let shared = service.host().posts_in_channel("c2");
        assert_eq!(shared.len(), 1);
        assert_eq!(
            shared[0].message,
            "> Shared from ~town-square. ([original post](https://chat.co/eng/pl/root))"
        );
        assert_eq!(shared[0].user_id, "u1");
        assert_eq!(shared[0].prop_str(ADDITIONAL_TEXT_PROP), Some("fyi\n\n"));

        let ephemeral = service.host().ephemeral_posts();
        assert_eq!(ephemeral.len(), 1);
        assert_eq!(ephemeral[0].0, "u1");
        assert_eq!(ephemeral[0].1.channel_id, "c1");
        assert_eq!(
            ephemeral[0].1.message,
            format!(
                "[This post](https://chat.co/eng/pl/root) is shared to ~random. [New post](https://chat.co/eng/pl/{}).",
                shared[0].id
            )
        );
        // The original is untouched.
        assert_eq!(service.host().post("root").unwrap().message, "root message");
    }

    #[tokio::test]
    async fn test_share_from_private_channel_requires_confirmation() {
        let service = ShareService::new(host(), SITE);
        let req = request("root", "c3", json!({"to_channel": "c2", "share_type": "share"}));

        let outcome = service.handle_submission(&req).await;
        let response = outcome.response.expect("field error response");
        assert!(response.errors.contains_key(FORCE_SHARE_KEY));
        assert!(service.host().posts_in_channel("c2").is_empty());

        let confirmed = request(
            "root",
            "c3",
            json!({"to_channel": "c2", "share_type": "share", "force_share": true}),
        );
        let outcome = service.handle_submission(&confirmed).await;
        assert_eq!(outcome, SubmitOutcome::default());
        assert_eq!(service.host().posts_in_channel("c2").len(), 1);
    }

    #[tokio::test]
    async fn test_move_thread() {
        let service = ShareService::new(host(), SITE);
        let req = request("root", "c1", json!({"to_channel": "c2", "share_type": "move"}));

        let outcome = service.handle_submission(&req).await;
        assert_eq!(outcome, SubmitOutcome::default());

        let moved = service.host().posts_in_channel("c2");
        assert_eq!(moved.len(), 3);
        let new_root = &moved[0];
        assert_eq!(new_root.message, "root message");
        assert!(!new_root.is_reply());
        assert_eq!(new_root.prop_str(ADDITIONAL_TEXT_PROP), Some(""));
        assert_eq!(moved[1].message, "first reply");
        assert_eq!(moved[2].message, "second reply");
        assert!(moved[1..].iter().all(|p| p.root_id == new_root.id));

        let notice = service.host().post("root").unwrap();
        assert_eq!(notice.post_type, POST_SYSTEM_GENERIC);
        assert_eq!(
            notice.message,
            format!("This post is moved to ~random. [New post](https://chat.co/eng/pl/{})", new_root.id)
        );
        assert_eq!(service.host().deleted_posts(), vec!["reply1", "reply2"]);
    }

    #[tokio::test]
    async fn test_move_copies_files() {
        let mut with_files = post("solo", "", 5, "has files");
        with_files.file_ids = vec!["f1".to_string(), "f2".to_string()];
        let service = ShareService::new(host().with_post(with_files), SITE);
        let req = request("solo", "c1", json!({"to_channel": "c2", "share_type": "move"}));

        service.handle_submission(&req).await;

        let moved = service.host().posts_in_channel("c2");
        assert_eq!(moved[0].file_ids, vec!["f1-copy", "f2-copy"]);
        assert!(service.host().post("solo").unwrap().file_ids.is_empty());
    }

    #[tokio::test]
    async fn test_move_reply_is_rejected() {
        let service = ShareService::new(host(), SITE);
        let req = request("reply1", "c1", json!({"to_channel": "c2", "share_type": "move"}));

        let outcome = service.handle_submission(&req).await;
        assert_eq!(outcome, SubmitOutcome::message(MESSAGE_MOVE_REPLY));
        assert!(service.host().posts_in_channel("c2").is_empty());
    }

    #[tokio::test]
    async fn test_move_to_same_channel_is_rejected() {
        let service = ShareService::new(host(), SITE);
        let req = request("root", "c1", json!({"to_channel": "c1", "share_type": "move"}));

        let outcome = service.handle_submission(&req).await;
        assert_eq!(outcome, SubmitOutcome::message(MESSAGE_MOVE_SAME_CHANNEL));
    }

    #[tokio::test]
    async fn test_move_rolls_back_on_reply_failure() {
        // Root and first reply succeed, second reply fails.
        let service = ShareService::new(host().fail_creates_after(2), SITE);
        let req = request("root", "c1", json!({"to_channel": "c2", "share_type": "move"}));

        let outcome = service.handle_submission(&req).await;
        assert_eq!(outcome, SubmitOutcome::message(MESSAGE_GENERIC_ERROR));

        assert!(service.host().posts_in_channel("c2").is_empty());
        assert_eq!(service.host().deleted_posts().len(), 2);
        let root = service.host().post("root").unwrap();
        assert_eq!(root.message, "root message");
        assert!(service.host().post("reply1").is_some());
    }

    #[tokio::test]
    async fn test_invalid_submission_reports_generic_error() {
        let service = ShareService::new(host(), SITE);
        let req = request("root", "c1", json!({"share_type": "share"}));
        assert_eq!(
            service.handle_submission(&req).await,
            SubmitOutcome::message(MESSAGE_GENERIC_ERROR)
        );

        let req = request("root", "c1", json!({"to_channel": "c2", "share_type": "copy"}));
        assert_eq!(
            service.handle_submission(&req).await,
            SubmitOutcome::message(MESSAGE_GENERIC_ERROR)
        );
    }

    #[tokio::test]
    async fn test_unknown_target_channel() {
        let service = ShareService::new(host(), SITE);
        let req = request("root", "c1", json!({"to_channel": "missing", "share_type": "share"}));
        assert_eq!(
            service.handle_submission(&req).await,
            SubmitOutcome::message(MESSAGE_GENERIC_ERROR)
        );
        assert!(service.host().ephemeral_posts().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_submission_is_ignored() {
        let service = ShareService::new(host(), SITE);
        let mut req = request("root", "c1", json!({}));
        req.cancelled = true;
        assert_eq!(service.handle_submission(&req).await, SubmitOutcome::default());
    }
}
