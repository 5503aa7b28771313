//! Configuration types.
//!
//! `ClientConfig` is the slice of the host's site configuration the dialog
//! builder reads. `ServiceConfig` is the `sharepost.toml` of the HTTP service.

use serde::{Deserialize, Serialize};

/// Host site configuration as exposed to client extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Public base URL of the host, possibly with a sub-path.
    #[serde(rename = "SiteURL", default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
}

impl ClientConfig {
    pub fn with_site_url(site_url: impl Into<String>) -> Self {
        Self {
            site_url: Some(site_url.into()),
        }
    }
}

/// Top-level configuration of the `sharepost` service.
///
/// Loaded from `sharepost.toml`. All sections have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub mattermost: MattermostSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    9065
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Connection to the host's REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MattermostSection {
    /// Address the service uses to reach the REST API.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Public `SiteURL` of the host, used for dialog routes and permalinks.
    #[serde(default)]
    pub site_url: Option<String>,
    /// Bot or personal access token. Prefer `SHAREPOST_ACCESS_TOKEN`.
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

fn default_server_url() -> String {
    "http://localhost:8065".to_string()
}

impl Default for MattermostSection {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            site_url: None,
            access_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogSection {
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// Bridge spans to the OpenTelemetry stdout exporter.
    #[serde(default)]
    pub otel: bool,
}

impl ServiceConfig {
    /// The host site configuration derived from this service config.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            site_url: self.mattermost.site_url.clone(),
        }
    }
}
