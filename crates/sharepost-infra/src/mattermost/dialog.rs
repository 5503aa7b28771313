//! Dialog opener for out-of-process callers.

use std::sync::Arc;

use sharepost_core::host::dialog::DialogOpener;
use sharepost_types::dialog::OpenDialogRequest;

use super::client::MattermostClient;

/// Opens dialogs through `POST /api/v4/actions/dialogs/open`.
///
/// The server only accepts a dialog together with the short-lived trigger id
/// it issued for the user's action, so each opener is bound to one trigger.
pub struct TriggerDialogOpener {
    client: Arc<MattermostClient>,
    trigger_id: String,
}

impl TriggerDialogOpener {
    pub fn new(client: Arc<MattermostClient>, trigger_id: impl Into<String>) -> Self {
        Self {
            client,
            trigger_id: trigger_id.into(),
        }
    }
}

impl DialogOpener for TriggerDialogOpener {
    /// Spawns the request on the current runtime; failures are logged only.
    fn open_interactive_dialog(&self, mut request: OpenDialogRequest) {
        request.trigger_id = Some(self.trigger_id.clone());

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(callback_id = %request.dialog.callback_id, "no async runtime, dialog not opened");
            return;
        };

        let client = Arc::clone(&self.client);
        runtime.spawn(async move {
            match client.open_dialog(&request).await {
                Ok(()) => tracing::debug!(callback_id = %request.dialog.callback_id, "dialog opened"),
                Err(e) => tracing::warn!(
                    callback_id = %request.dialog.callback_id,
                    error = %e,
                    "failed to open dialog"
                ),
            }
        });
    }
}
