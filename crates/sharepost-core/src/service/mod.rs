//! Server-side services behind the dialog submission and the message hook.

pub mod permalink;
pub mod share;

/// Ephemeral reply shown whenever a submission fails unexpectedly.
pub const MESSAGE_GENERIC_ERROR: &str = "Something went wrong. Please try again later.";

/// Permalink to a post: `{site_url}/{team}/pl/{post_id}`.
pub fn make_post_link(site_url: &str, team_name: &str, post_id: &str) -> String {
    format!("{}/{}/pl/{}", site_url.trim_end_matches('/'), team_name, post_id)
}
