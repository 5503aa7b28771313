use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Post type of an ordinary user message.
pub const POST_DEFAULT: &str = "";
/// Post type of a system notice without author rendering.
pub const POST_SYSTEM_GENERIC: &str = "system_generic";
/// Post type the host uses for posts carrying message attachments.
pub const POST_SLACK_ATTACHMENT: &str = "slack_attachment";

/// Prop key holding the message attachments of a post.
pub const PROP_ATTACHMENTS: &str = "attachments";

/// A message in a channel, as exchanged with the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub channel_id: String,
    /// Id of the thread root; empty for root posts.
    #[serde(default)]
    pub root_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub post_type: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Post {
    /// Whether the post is a reply inside a thread.
    pub fn is_reply(&self) -> bool {
        !self.root_id.is_empty()
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    pub fn set_prop(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(key.into(), value.into());
    }

    /// Replace the attachments of the post.
    ///
    /// Untyped posts become attachment posts so the host renders them.
    pub fn set_attachments(&mut self, attachments: Vec<MessageAttachment>) {
        if self.post_type.is_empty() {
            self.post_type = POST_SLACK_ATTACHMENT.to_string();
        }
        let value = serde_json::to_value(attachments).unwrap_or(Value::Array(Vec::new()));
        self.props.insert(PROP_ATTACHMENTS.to_string(), value);
    }

    /// Copy of the post without its identity, ready to be created again.
    pub fn duplicate(&self) -> Post {
        Post {
            id: String::new(),
            ..self.clone()
        }
    }
}

/// A thread as returned by the host: ids in display order plus the posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub posts: HashMap<String, Post>,
}

impl PostList {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Drop duplicate ids from `order`, keeping the first occurrence.
    pub fn unique_order(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.order.retain(|id| seen.insert(id.clone()));
    }

    /// Posts sorted oldest first. Ties keep id order for determinism.
    pub fn sorted_by_create_at(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().collect();
        posts.sort_by(|a, b| a.create_at.cmp(&b.create_at).then_with(|| a.id.cmp(&b.id)));
        posts
    }
}

/// A rich attachment rendered under a post's message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageAttachment {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author_icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub footer: String,
    /// Creation time of the quoted post, milliseconds since the epoch.
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}
