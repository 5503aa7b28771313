//! Extension points the host exposes to integrations.

/// Callback invoked with the id of the post the user acted on.
pub type PostActionHandler = Box<dyn Fn(&str) + Send + Sync>;

/// The host's registry of client extensions.
pub trait PluginRegistry {
    /// Add a command to the per-message context menu.
    fn register_post_dropdown_menu_action(&mut self, label: &str, handler: PostActionHandler);
}
