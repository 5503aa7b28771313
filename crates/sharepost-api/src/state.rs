//! Application state wiring the services to one host implementation.
//!
//! Handlers are generic over [`HostApi`]; `serve` pins it to
//! [`MattermostClient`], tests to the in-memory host.

use std::sync::Arc;

use sharepost_core::host::api::HostApi;
use sharepost_core::host::dialog::DialogOpener;
use sharepost_core::service::permalink::PermalinkExpander;
use sharepost_core::service::share::ShareService;
use sharepost_infra::mattermost::{MattermostClient, TriggerDialogOpener};
use sharepost_types::config::ClientConfig;

/// Produces the dialog opener for one action trigger id.
pub type OpenerFactory = Arc<dyn Fn(&str) -> Arc<dyn DialogOpener> + Send + Sync>;

/// Shared state handed to every handler.
pub struct AppState<H: HostApi> {
    pub host: Arc<H>,
    pub share_service: Arc<ShareService<Arc<H>>>,
    pub permalink: Arc<PermalinkExpander<Arc<H>>>,
    pub client_config: ClientConfig,
    pub openers: OpenerFactory,
}

impl<H: HostApi> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            share_service: Arc::clone(&self.share_service),
            permalink: Arc::clone(&self.permalink),
            client_config: self.client_config.clone(),
            openers: Arc::clone(&self.openers),
        }
    }
}

impl<H: HostApi> AppState<H> {
    /// Wire the services around `host`.
    pub fn new(host: Arc<H>, client_config: ClientConfig, openers: OpenerFactory) -> Self {
        let site_url = client_config.site_url.clone().unwrap_or_default();
        Self {
            share_service: Arc::new(ShareService::new(Arc::clone(&host), site_url.clone())),
            permalink: Arc::new(PermalinkExpander::new(Arc::clone(&host), site_url)),
            host,
            client_config,
            openers,
        }
    }
}

/// State of the production server.
pub type MattermostState = AppState<MattermostClient>;

impl MattermostState {
    /// Wire the services to a live Mattermost server.
    pub fn for_mattermost(client: Arc<MattermostClient>, client_config: ClientConfig) -> Self {
        let opener_client = Arc::clone(&client);
        let openers: OpenerFactory = Arc::new(move |trigger_id: &str| -> Arc<dyn DialogOpener> {
            Arc::new(TriggerDialogOpener::new(Arc::clone(&opener_client), trigger_id))
        });
        Self::new(client, client_config, openers)
    }
}
