//! Business logic and host port definitions for the share-post integration.
//!
//! This crate defines the "ports" (host traits) that adapters implement and
//! the logic built on top of them: the share dialog builder, the menu action
//! wiring, and the share/move and permalink services. It depends only on
//! `sharepost-types` -- never on `sharepost-infra` or any HTTP crate.

pub mod dialog;
pub mod host;
pub mod plugin;
pub mod service;
