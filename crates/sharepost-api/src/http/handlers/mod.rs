pub mod action;
pub mod health;
pub mod hook;
pub mod share;
