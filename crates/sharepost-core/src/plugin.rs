//! Menu action wiring and activation checks.
//!
//! `SharePostAction` is the handler behind the "Share post" menu entry: it
//! reads the state snapshot, builds the dialog and hands it to the host.
//! `SharePostPlugin::initialize` registers it with the host registry.

use std::sync::Arc;

use semver::{Version, VersionReq};
use sharepost_types::error::ConfigError;

use crate::dialog::builder::DialogRequestBuilder;
use crate::host::dialog::DialogOpener;
use crate::host::registry::PluginRegistry;
use crate::host::state::AppStateReader;

/// Label of the per-message menu entry.
pub const MENU_LABEL: &str = "Share post";

/// Oldest host version the share/move endpoints are known to work with.
pub const MIN_SERVER_VERSION: &str = "5.16.0";

/// The "Share post" menu action.
///
/// Every invocation is independent: nothing is cached between calls.
pub struct SharePostAction<S, D> {
    state: S,
    opener: D,
    builder: DialogRequestBuilder,
}

impl<S: AppStateReader, D: DialogOpener> SharePostAction<S, D> {
    pub fn new(state: S, opener: D) -> Self {
        Self {
            state,
            opener,
            builder: DialogRequestBuilder::new(),
        }
    }

    /// Handle a click on the menu entry for `post_id`.
    pub fn invoke(&self, post_id: &str) {
        let request = self.builder.build(post_id, &self.state);
        tracing::debug!(
            post_id,
            url = %request.url,
            elements = request.dialog.elements.len(),
            "opening share dialog"
        );
        self.opener.open_interactive_dialog(request);
    }
}

/// Entry point the host calls when it loads the integration.
pub struct SharePostPlugin;

impl SharePostPlugin {
    /// Register the "Share post" menu action.
    pub fn initialize<R, S, D>(registry: &mut R, action: SharePostAction<S, D>)
    where
        R: PluginRegistry + ?Sized,
        S: AppStateReader + Send + Sync + 'static,
        D: DialogOpener + 'static,
    {
        let action = Arc::new(action);
        registry.register_post_dropdown_menu_action(
            MENU_LABEL,
            Box::new(move |post_id: &str| action.invoke(post_id)),
        );
    }
}

/// Check a host version string against [`MIN_SERVER_VERSION`].
///
/// Hosts report versions like `5.31.0.5.31.1.abc123.false`; only the first
/// three components are significant.
pub fn check_server_version(raw: &str) -> Result<Version, ConfigError> {
    let core: Vec<&str> = raw.trim().splitn(4, '.').take(3).collect();
    let version = Version::parse(&core.join("."))
        .map_err(|_| ConfigError::InvalidServerVersion(raw.to_string()))?;

    let required = VersionReq::parse(&format!(">={MIN_SERVER_VERSION}"))
        .map_err(|_| ConfigError::InvalidServerVersion(MIN_SERVER_VERSION.to_string()))?;
    if !required.matches(&version) {
        return Err(ConfigError::UnsupportedServerVersion {
            required: MIN_SERVER_VERSION.to_string(),
            actual: version.to_string(),
        });
    }
    Ok(version)
}
