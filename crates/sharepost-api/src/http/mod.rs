//! HTTP surface of the share-post service.
//!
//! Axum router mounted at `/plugins/{PLUGIN_ID}`: the dialog submission
//! endpoint under `/api/v1`, the menu action trigger and the message hook.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
