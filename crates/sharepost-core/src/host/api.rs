//! Server-side host API trait definition.

use sharepost_types::channel::Channel;
use sharepost_types::error::HostError;
use sharepost_types::post::{Post, PostList};
use sharepost_types::team::{Team, User};

/// Channel, post, team and user operations of the host.
///
/// Implementations live in sharepost-infra (e.g., `MattermostClient`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait HostApi: Send + Sync {
    fn get_channel(
        &self,
        channel_id: &str,
    ) -> impl std::future::Future<Output = Result<Channel, HostError>> + Send;

    fn get_team(
        &self,
        team_id: &str,
    ) -> impl std::future::Future<Output = Result<Team, HostError>> + Send;

    fn get_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<User, HostError>> + Send;

    fn get_post(
        &self,
        post_id: &str,
    ) -> impl std::future::Future<Output = Result<Post, HostError>> + Send;

    /// The whole thread containing the post, root included.
    fn get_post_thread(
        &self,
        post_id: &str,
    ) -> impl std::future::Future<Output = Result<PostList, HostError>> + Send;

    /// Create a post. Returns it with the id the host assigned.
    fn create_post(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<Post, HostError>> + Send;

    fn update_post(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<Post, HostError>> + Send;

    fn delete_post(
        &self,
        post_id: &str,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;

    /// Duplicate file attachments so a new post in `channel_id` can own them.
    /// Returns the new file ids in the same order.
    fn copy_file_infos(
        &self,
        user_id: &str,
        file_ids: &[String],
        channel_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, HostError>> + Send;

    /// Show a post to one user only.
    fn send_ephemeral_post(
        &self,
        user_id: &str,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send;
}

impl<T: HostApi> HostApi for std::sync::Arc<T> {
    fn get_channel(
        &self,
        channel_id: &str,
    ) -> impl std::future::Future<Output = Result<Channel, HostError>> + Send {
        (**self).get_channel(channel_id)
    }

    fn get_team(
        &self,
        team_id: &str,
    ) -> impl std::future::Future<Output = Result<Team, HostError>> + Send {
        (**self).get_team(team_id)
    }

    fn get_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<User, HostError>> + Send {
        (**self).get_user(user_id)
    }

    fn get_post(
        &self,
        post_id: &str,
    ) -> impl std::future::Future<Output = Result<Post, HostError>> + Send {
        (**self).get_post(post_id)
    }

    fn get_post_thread(
        &self,
        post_id: &str,
    ) -> impl std::future::Future<Output = Result<PostList, HostError>> + Send {
        (**self).get_post_thread(post_id)
    }

    fn create_post(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<Post, HostError>> + Send {
        (**self).create_post(post)
    }

    fn update_post(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<Post, HostError>> + Send {
        (**self).update_post(post)
    }

    fn delete_post(
        &self,
        post_id: &str,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send {
        (**self).delete_post(post_id)
    }

    fn copy_file_infos(
        &self,
        user_id: &str,
        file_ids: &[String],
        channel_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, HostError>> + Send {
        (**self).copy_file_infos(user_id, file_ids, channel_id)
    }

    fn send_ephemeral_post(
        &self,
        user_id: &str,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<(), HostError>> + Send {
        (**self).send_ephemeral_post(user_id, post)
    }
}
