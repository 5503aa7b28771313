//! Infrastructure layer for the share-post service.
//!
//! Contains implementations of the host ports defined in `sharepost-core`:
//! the Mattermost REST client and the trigger-based dialog opener, plus the
//! `sharepost.toml` loader.

pub mod config;
pub mod mattermost;
