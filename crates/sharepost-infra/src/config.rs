//! Service configuration loader.
//!
//! Reads `sharepost.toml` and deserializes it into [`ServiceConfig`]. Falls
//! back to defaults when the file is missing or malformed. The access token
//! may come from the file or the `SHAREPOST_ACCESS_TOKEN` environment variable.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use sharepost_types::config::ServiceConfig;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sharepost.toml";

/// Environment variable holding the bot access token.
pub const ACCESS_TOKEN_ENV: &str = "SHAREPOST_ACCESS_TOKEN";

/// Path of the config file to load: the explicit one, else [`DEFAULT_CONFIG_FILE`].
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the service configuration from `path`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_service_config(path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServiceConfig::default()
        }
    }
}

/// Resolve the bot access token.
///
/// Priority:
/// 1. `env_value` (the content of [`ACCESS_TOKEN_ENV`]), when non-empty
/// 2. `mattermost.access_token` from the config file
pub fn resolve_access_token(config: &ServiceConfig, env_value: Option<String>) -> Option<SecretString> {
    env_value
        .filter(|token| !token.trim().is_empty())
        .or_else(|| config.mattermost.access_token.clone())
        .filter(|token| !token.trim().is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_service_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_service_config(&tmp.path().join("sharepost.toml")).await;
        assert_eq!(config.server.port, 9065);
        assert_eq!(config.mattermost.server_url, "http://localhost:8065");
        assert!(config.mattermost.site_url.is_none());
    }

    #[tokio::test]
    async fn load_service_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sharepost.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 8080

[mattermost]
server_url = "http://mattermost:8065"
site_url = "https://chat.example.com/mm"
access_token = "file-token"

[log]
json = true
"#,
        )
        .await
        .unwrap();

        let config = load_service_config(&path).await;
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.mattermost.server_url, "http://mattermost:8065");
        assert_eq!(
            config.mattermost.site_url.as_deref(),
            Some("https://chat.example.com/mm")
        );
        assert!(config.log.json);
        assert!(!config.log.otel);
    }

    #[tokio::test]
    async fn load_service_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sharepost.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_service_config(&path).await;
        assert_eq!(config.server.port, 9065);
    }

    #[test]
    fn resolve_config_path_prefers_explicit() {
        assert_eq!(
            resolve_config_path(Some(Path::new("/etc/sharepost.toml"))),
            PathBuf::from("/etc/sharepost.toml")
        );
        assert_eq!(resolve_config_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn resolve_access_token_env_wins_over_file() {
        let mut config = ServiceConfig::default();
        config.mattermost.access_token = Some("file-token".to_string());

        let token = resolve_access_token(&config, Some("env-token".to_string())).unwrap();
        assert_eq!(token.expose_secret(), "env-token");

        let token = resolve_access_token(&config, Some("  ".to_string())).unwrap();
        assert_eq!(token.expose_secret(), "file-token");

        let token = resolve_access_token(&config, None).unwrap();
        assert_eq!(token.expose_secret(), "file-token");
    }

    #[test]
    fn resolve_access_token_none_when_unset() {
        assert!(resolve_access_token(&ServiceConfig::default(), None).is_none());
    }
}
