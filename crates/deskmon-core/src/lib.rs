//! Core deskmon library (auth API client, session storage, config).

pub mod api;
pub mod auth;
pub mod config;
pub mod logging;
pub mod session;
