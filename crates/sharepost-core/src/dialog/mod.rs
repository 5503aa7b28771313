//! Share dialog construction.
//!
//! `route` derives the server path the host submits the dialog to;
//! `builder` composes the element schema.

pub mod builder;
pub mod route;
