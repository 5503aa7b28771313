//! Mattermost REST API (v4) adapter.
//!
//! [`MattermostClient`] implements [`HostApi`](sharepost_core::host::api::HostApi)
//! over HTTP; [`TriggerDialogOpener`] implements
//! [`DialogOpener`](sharepost_core::host::dialog::DialogOpener) for dialogs
//! opened from a message action trigger.

pub mod client;
pub mod dialog;
pub mod types;

pub use client::MattermostClient;
pub use dialog::TriggerDialogOpener;
