//! Shared domain types for the share-post integration.
//!
//! This crate contains the wire and domain types used across the workspace:
//! the interactive-dialog schema, the chat entities (channel, post, team, user)
//! the share/move submission, configuration, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod channel;
pub mod config;
pub mod dialog;
pub mod error;
pub mod post;
pub mod share;
pub mod team;
