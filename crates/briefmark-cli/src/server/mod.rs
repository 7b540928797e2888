//! Local web server for the review UI.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
