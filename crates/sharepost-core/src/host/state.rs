//! Read access to the host's application state.

use sharepost_types::channel::Channel;
use sharepost_types::config::ClientConfig;

/// Read-only accessors over the host's state store.
///
/// One invocation of an action reads through this trait as if it were an
/// immutable snapshot.
pub trait AppStateReader {
    /// Site configuration, if the host has loaded one.
    fn config(&self) -> Option<ClientConfig>;

    /// The channel the user is currently viewing, if any.
    fn current_channel(&self) -> Option<Channel>;
}

/// A frozen copy of the state a single action invocation needs.
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    pub config: Option<ClientConfig>,
    pub channel: Option<Channel>,
}

impl StateSnapshot {
    pub fn new(config: Option<ClientConfig>, channel: Option<Channel>) -> Self {
        Self { config, channel }
    }
}

impl AppStateReader for StateSnapshot {
    fn config(&self) -> Option<ClientConfig> {
        self.config.clone()
    }

    fn current_channel(&self) -> Option<Channel> {
        self.channel.clone()
    }
}

impl<T: AppStateReader + ?Sized> AppStateReader for std::sync::Arc<T> {
    fn config(&self) -> Option<ClientConfig> {
        (**self).config()
    }

    fn current_channel(&self) -> Option<Channel> {
        (**self).current_channel()
    }
}
