//! Observability setup for the share-post service.

pub mod tracing_setup;
