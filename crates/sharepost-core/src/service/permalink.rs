//! Permalink expansion for posts about to be created.
//!
//! When a new message links to another post on the same site and team, the
//! linked post is quoted as a message attachment and its files are copied
//! onto the new post. The share annotation stored in the post props is
//! prepended to the message afterwards, so links inside the annotation are
//! never expanded.

use chrono::DateTime;
use regex::Regex;

use sharepost_types::error::{HostError, ShareError};
use sharepost_types::post::{MessageAttachment, Post};
use sharepost_types::share::ADDITIONAL_TEXT_PROP;

use crate::host::api::HostApi;

/// Rewrites posts before the host stores them.
pub struct PermalinkExpander<H: HostApi> {
    host: H,
    site_url: String,
}

impl<H: HostApi> PermalinkExpander<H> {
    pub fn new(host: H, site_url: impl Into<String>) -> Self {
        Self {
            host,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Return the post as it should be stored.
    ///
    /// Lookup failures leave the message as written; the post is never
    /// rejected.
    pub async fn message_will_be_posted(&self, post: Post) -> Post {
        let expansion = self.expand_first_permalink(&post).await;
        let mut post = match expansion {
            Ok(Some(expanded)) => expanded,
            Ok(None) => post,
            Err(e) => {
                tracing::warn!(channel_id = %post.channel_id, error = %e, "permalink expansion skipped");
                post
            }
        };

        if let Some(text) = post.prop_str(ADDITIONAL_TEXT_PROP).map(str::to_string) {
            post.message = format!("{text}{}", post.message);
        }
        post
    }

    /// Expand the first permalink in the message, if any.
    ///
    /// Only the first match is expanded: the host caps attachments per post.
    async fn expand_first_permalink(&self, post: &Post) -> Result<Option<Post>, ShareError> {
        let channel = self
            .host
            .get_channel(&post.channel_id)
            .await
            .map_err(ShareError::host("get channel"))?;
        if channel.is_direct() || channel.team_id.is_empty() {
            return Ok(None);
        }

        let team = self
            .host
            .get_team(&channel.team_id)
            .await
            .map_err(ShareError::host("get team"))?;

        let Some(linked_id) = self.find_linked_post_id(&team.name, &post.message)? else {
            return Ok(None);
        };

        let linked = self
            .host
            .get_post(&linked_id)
            .await
            .map_err(ShareError::host("get linked post"))?;

        let mut expanded = post.clone();
        if !linked.file_ids.is_empty() {
            let copies = self
                .host
                .copy_file_infos(&post.user_id, &linked.file_ids, &post.channel_id)
                .await
                .map_err(ShareError::host("copy file infos"))?;
            expanded.file_ids.extend(copies);
        }

        let linked_channel = self
            .host
            .get_channel(&linked.channel_id)
            .await
            .map_err(ShareError::host("get linked channel"))?;
        let author = self
            .host
            .get_user(&linked.user_id)
            .await
            .map_err(ShareError::host("get user"))?;

        expanded.set_attachments(vec![MessageAttachment {
            author_name: author.display_name_with_prefix("@"),
            author_icon: format!("{}/api/v4/users/{}/image", self.site_url, author.id),
            text: linked.message.clone(),
            footer: format!(
                "Posted in ~{} {}",
                linked_channel.name,
                format_posted_at(linked.create_at)
            ),
            timestamp: Some(linked.create_at),
        }]);
        Ok(Some(expanded))
    }

    fn find_linked_post_id(&self, team_name: &str, message: &str) -> Result<Option<String>, ShareError> {
        let pattern = format!(r"{}/{}/[\w/]+", regex::escape(&self.site_url), regex::escape(team_name));
        let re = Regex::new(&pattern).map_err(|e| ShareError::Host {
            action: "compile permalink pattern",
            source: HostError::Decode(e.to_string()),
        })?;

        Ok(re.find(message).and_then(|m| {
            m.as_str()
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .map(str::to_string)
        }))
    }
}

/// `on Mon 2 Jan 2006 at 15:04:05 UTC`
fn format_posted_at(create_at_ms: i64) -> String {
    match DateTime::from_timestamp(create_at_ms / 1000, 0) {
        Some(at) => at.format("on %a %-d %b %Y at %H:%M:%S UTC").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::InMemoryHost;
    use sharepost_types::channel::{Channel, ChannelType};
    use sharepost_types::post::PROP_ATTACHMENTS;
    use sharepost_types::team::{Team, User};

    const SITE: &str = "https://chat.co";

    fn channel(id: &str, name: &str, channel_type: ChannelType, team_id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            team_id: team_id.to_string(),
            name: name.to_string(),
            display_name: name.to_string(),
            channel_type,
        }
    }

    fn host() -> InMemoryHost {
        let mut linked = Post {
            id: "abc123".to_string(),
            channel_id: "c1".to_string(),
            user_id: "author".to_string(),
            message: "original text".to_string(),
            create_at: 1_136_214_245_000,
            ..Post::default()
        };
        linked.file_ids = vec!["f1".to_string()];

        InMemoryHost::new()
            .with_channel(channel("c1", "town-square", ChannelType::Open, "t1"))
            .with_channel(channel("c2", "random", ChannelType::Open, "t1"))
            .with_channel(channel("dm", "u1__u2", ChannelType::Direct, ""))
            .with_team(Team {
                id: "t1".to_string(),
                name: "eng".to_string(),
                display_name: "Engineering".to_string(),
            })
            .with_user(User {
                id: "author".to_string(),
                username: "jdoe".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                ..User::default()
            })
            .with_post(linked)
    }

    fn new_post(channel_id: &str, message: &str) -> Post {
        Post {
            channel_id: channel_id.to_string(),
            user_id: "u2".to_string(),
            message: message.to_string(),
            ..Post::default()
        }
    }

    #[test]
    fn test_format_posted_at() {
        assert_eq!(
            format_posted_at(1_136_214_245_000),
            "on Mon 2 Jan 2006 at 15:04:05 UTC"
        );
    }

    #[tokio::test]
    async fn test_expands_first_permalink() {
        let expander = PermalinkExpander::new(host(), SITE);
        let post = new_post("c2", "see https://chat.co/eng/pl/abc123 please");

        let out = expander.message_will_be_posted(post).await;

        assert_eq!(out.file_ids, vec!["f1-copy"]);
        let attachment = &out.props[PROP_ATTACHMENTS][0];
        assert_eq!(attachment["author_name"], "Jane Doe");
        assert_eq!(attachment["author_icon"], "https://chat.co/api/v4/users/author/image");
        assert_eq!(attachment["text"], "original text");
        assert_eq!(
            attachment["footer"],
            "Posted in ~town-square on Mon 2 Jan 2006 at 15:04:05 UTC"
        );
        assert_eq!(out.message, "see https://chat.co/eng/pl/abc123 please");
    }

    #[tokio::test]
    async fn test_prepends_additional_text_after_expansion() {
        let expander = PermalinkExpander::new(host(), SITE);
        let mut post = new_post(
            "c2",
            "> Shared from ~town-square. ([original post](https://chat.co/eng/pl/abc123))",
        );
        post.set_prop(ADDITIONAL_TEXT_PROP, "look https://chat.co/eng/pl/other\n\n");

        let out = expander.message_will_be_posted(post).await;

        assert!(out.message.starts_with("look https://chat.co/eng/pl/other\n\n> Shared from"));
        assert_eq!(out.props[PROP_ATTACHMENTS][0]["text"], "original text");
    }

    #[tokio::test]
    async fn test_direct_channel_is_not_expanded() {
        let expander = PermalinkExpander::new(host(), SITE);
        let post = new_post("dm", "https://chat.co/eng/pl/abc123");

        let out = expander.message_will_be_posted(post.clone()).await;
        assert_eq!(out, post);
    }

    #[tokio::test]
    async fn test_other_team_or_site_is_ignored() {
        let expander = PermalinkExpander::new(host(), SITE);
        for message in [
            "https://chat.co/sales/pl/abc123",
            "https://other.site/eng/pl/abc123",
            "no links here",
        ] {
            let post = new_post("c2", message);
            let out = expander.message_will_be_posted(post.clone()).await;
            assert_eq!(out, post, "{message}");
        }
    }

    #[tokio::test]
    async fn test_unknown_linked_post_leaves_post_unchanged() {
        let expander = PermalinkExpander::new(host(), SITE);
        let post = new_post("c2", "https://chat.co/eng/pl/missing");

        let out = expander.message_will_be_posted(post.clone()).await;
        assert_eq!(out, post);
    }
}
