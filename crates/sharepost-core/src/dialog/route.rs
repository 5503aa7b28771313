//! Server route derivation.
//!
//! The host serves integrations under `{base_path}/plugins/{plugin_id}`, where
//! `base_path` is the path component of the configured `SiteURL` without its
//! trailing slash. A route that disagrees with the host by one slash 404s at
//! submission time, and the host never corrects it.

use sharepost_types::config::ClientConfig;
use sharepost_types::error::ConfigError;
use url::Url;

/// Identifier the host registers this integration under.
pub const PLUGIN_ID: &str = "com.github.sharepost";

/// Path of the share/move submission endpoint below the plugin route.
pub const SHARE_ENDPOINT: &str = "/api/v1/share";

/// Where the host routes requests for this integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRouteConfig {
    pub base_path: String,
    pub plugin_id: String,
}

impl ServerRouteConfig {
    /// Derive the route from the host's site configuration.
    ///
    /// An unparsable `SiteURL` falls back to the root base path with a
    /// warning; the share action is never blocked on it.
    pub fn from_config(config: Option<&ClientConfig>) -> Self {
        let base_path = match site_url(config) {
            Some(raw) => parse_base_path(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to root base path");
                String::new()
            }),
            None => String::new(),
        };

        Self {
            base_path,
            plugin_id: PLUGIN_ID.to_string(),
        }
    }

    /// `{base_path}/plugins/{plugin_id}`
    pub fn plugin_route(&self) -> String {
        format!("{}/plugins/{}", self.base_path, self.plugin_id)
    }

    /// Absolute path of the share endpoint, as the dialog `url`.
    pub fn share_url(&self) -> String {
        format!("{}{}", self.plugin_route(), SHARE_ENDPOINT)
    }
}

fn site_url(config: Option<&ClientConfig>) -> Option<&str> {
    config
        .and_then(|c| c.site_url.as_deref())
        .filter(|s| !s.is_empty())
}

/// Path component of `site_url` with exactly one trailing slash removed.
pub fn parse_base_path(site_url: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(site_url).map_err(|e| ConfigError::InvalidSiteUrl {
        url: site_url.to_string(),
        reason: e.to_string(),
    })?;

    let path = parsed.path();
    Ok(path.strip_suffix('/').unwrap_or(path).to_string())
}

/// `{base_path}/plugins/{plugin_id}` for the given site configuration.
pub fn plugin_server_route(config: Option<&ClientConfig>) -> String {
    ServerRouteConfig::from_config(config).plugin_route()
}
