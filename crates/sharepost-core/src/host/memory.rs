//! In-memory host used by tests and local dry runs.
//!
//! Implements [`HostApi`] over hash maps and records every dialog and
//! ephemeral post so callers can assert on them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use sharepost_types::channel::Channel;
use sharepost_types::dialog::OpenDialogRequest;
use sharepost_types::error::HostError;
use sharepost_types::post::{Post, PostList};
use sharepost_types::team::{Team, User};

use super::api::HostApi;
use super::dialog::DialogOpener;

#[derive(Default)]
struct Inner {
    channels: HashMap<String, Channel>,
    teams: HashMap<String, Team>,
    users: HashMap<String, User>,
    posts: HashMap<String, Post>,
    ephemeral: Vec<(String, Post)>,
    dialogs: Vec<OpenDialogRequest>,
    deleted: Vec<String>,
    next_id: u64,
    creates: usize,
    fail_create_after: Option<usize>,
}

/// A host whose whole state lives in memory.
#[derive(Default)]
pub struct InMemoryHost {
    inner: Mutex<Inner>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_channel(self, channel: Channel) -> Self {
        self.lock().channels.insert(channel.id.clone(), channel);
        self
    }

    pub fn with_team(self, team: Team) -> Self {
        self.lock().teams.insert(team.id.clone(), team);
        self
    }

    pub fn with_user(self, user: User) -> Self {
        self.lock().users.insert(user.id.clone(), user);
        self
    }

    pub fn with_post(self, post: Post) -> Self {
        self.lock().posts.insert(post.id.clone(), post);
        self
    }

    /// Make every `create_post` after the first `n` successful ones fail.
    pub fn fail_creates_after(self, n: usize) -> Self {
        self.lock().fail_create_after = Some(n);
        self
    }

    pub fn post(&self, post_id: &str) -> Option<Post> {
        self.lock().posts.get(post_id).cloned()
    }

    /// Posts of a channel, oldest first.
    pub fn posts_in_channel(&self, channel_id: &str) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .lock()
            .posts
            .values()
            .filter(|p| p.channel_id == channel_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| a.create_at.cmp(&b.create_at).then_with(|| a.id.cmp(&b.id)));
        posts
    }

    /// Ephemeral posts as `(user_id, post)` in send order.
    pub fn ephemeral_posts(&self) -> Vec<(String, Post)> {
        self.lock().ephemeral.clone()
    }

    pub fn opened_dialogs(&self) -> Vec<OpenDialogRequest> {
        self.lock().dialogs.clone()
    }

    pub fn deleted_posts(&self) -> Vec<String> {
        self.lock().deleted.clone()
    }
}

fn not_found(resource: &'static str, id: &str) -> HostError {
    HostError::NotFound {
        resource,
        id: id.to_string(),
    }
}

impl HostApi for InMemoryHost {
    async fn get_channel(&self, channel_id: &str) -> Result<Channel, HostError> {
        self.lock()
            .channels
            .get(channel_id)
            .cloned()
            .ok_or_else(|| not_found("channel", channel_id))
    }

    async fn get_team(&self, team_id: &str) -> Result<Team, HostError> {
        self.lock()
            .teams
            .get(team_id)
            .cloned()
            .ok_or_else(|| not_found("team", team_id))
    }

    async fn get_user(&self, user_id: &str) -> Result<User, HostError> {
        self.lock()
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| not_found("user", user_id))
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, HostError> {
        self.lock()
            .posts
            .get(post_id)
            .cloned()
            .ok_or_else(|| not_found("post", post_id))
    }

    async fn get_post_thread(&self, post_id: &str) -> Result<PostList, HostError> {
        let inner = self.lock();
        let post = inner
            .posts
            .get(post_id)
            .ok_or_else(|| not_found("post", post_id))?;
        let root_id = if post.is_reply() {
            post.root_id.clone()
        } else {
            post.id.clone()
        };

        let mut list = PostList::default();
        for p in inner.posts.values() {
            if p.id == root_id || p.root_id == root_id {
                list.posts.insert(p.id.clone(), p.clone());
            }
        }
        // Newest first, like the host.
        let mut ordered: Vec<&Post> = list.posts.values().collect();
        ordered.sort_by(|a, b| b.create_at.cmp(&a.create_at));
        list.order = ordered.iter().map(|p| p.id.clone()).collect();
        Ok(list)
    }

    async fn create_post(&self, post: &Post) -> Result<Post, HostError> {
        let mut inner = self.lock();
        if inner.fail_create_after.is_some_and(|n| inner.creates >= n) {
            return Err(HostError::Status {
                status: 500,
                message: "create_post failure injected".to_string(),
            });
        }
        inner.creates += 1;
        inner.next_id += 1;

        let mut created = post.clone();
        created.id = format!("new-post-{}", inner.next_id);
        if created.create_at == 0 {
            created.create_at = 1_000_000 + inner.next_id as i64;
        }
        inner.posts.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_post(&self, post: &Post) -> Result<Post, HostError> {
        let mut inner = self.lock();
        match inner.posts.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post.clone())
            }
            None => Err(not_found("post", &post.id)),
        }
    }

    async fn delete_post(&self, post_id: &str) -> Result<(), HostError> {
        let mut inner = self.lock();
        if inner.posts.remove(post_id).is_none() {
            return Err(not_found("post", post_id));
        }
        inner.deleted.push(post_id.to_string());
        Ok(())
    }

    async fn copy_file_infos(
        &self,
        _user_id: &str,
        file_ids: &[String],
        _channel_id: &str,
    ) -> Result<Vec<String>, HostError> {
        Ok(file_ids.iter().map(|id| format!("{id}-copy")).collect())
    }

    async fn send_ephemeral_post(&self, user_id: &str, post: &Post) -> Result<(), HostError> {
        self.lock()
            .ephemeral
            .push((user_id.to_string(), post.clone()));
        Ok(())
    }
}

impl DialogOpener for InMemoryHost {
    fn open_interactive_dialog(&self, request: OpenDialogRequest) {
        self.lock().dialogs.push(request);
    }
}
