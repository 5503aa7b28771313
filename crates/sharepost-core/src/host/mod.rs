//! Host port definitions.
//!
//! The host application owns rendering, persistence and the REST surface.
//! These traits are the only way the core reaches it, so every capability can
//! be swapped for a test double.

pub mod api;
pub mod dialog;
pub mod memory;
pub mod registry;
pub mod state;
