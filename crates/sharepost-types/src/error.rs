use thiserror::Error;

/// Errors returned by the host platform ports (REST adapter, plugin API).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("host returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode host response: {0}")]
    Decode(String),
}

/// Errors raised while handling a share/move dialog submission.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("failed to get {key} key. Value is: {value}")]
    MissingField { key: &'static str, value: String },

    #[error("invalid share_type {0}")]
    InvalidShareType(String),

    #[error("failed to {action}: {source}")]
    Host {
        action: &'static str,
        #[source]
        source: HostError,
    },

    #[error("failed to move post thread and rollback: {0}")]
    Rollback(HostError),
}

impl ShareError {
    /// Wrap a host failure with the action that was being attempted.
    pub fn host(action: &'static str) -> impl FnOnce(HostError) -> ShareError {
        move |source| ShareError::Host { action, source }
    }
}

/// Errors related to configuration and activation checks.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site URL '{url}': {reason}")]
    InvalidSiteUrl { url: String, reason: String },

    #[error("siteURL is not set. Please set a siteURL and restart the service")]
    MissingSiteUrl,

    #[error("failed to parse server version '{0}'")]
    InvalidServerVersion(String),

    #[error("this integration requires Mattermost v{required} or later (found v{actual})")]
    UnsupportedServerVersion { required: String, actual: String },
}
