//! Creative Studio storefront client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks to the `/api/v1` REST backend, `state` owns the persisted
//! session and transient UI state, `views` turns server JSON into text
//! regions, and `app` dispatches user commands across all three. The
//! `studio-cli` binary is the presentation layer on top.

pub mod app;
pub mod config;
pub mod net;
pub mod state;
pub mod views;

pub use app::{Command, Outcome, Studio};
pub use config::ClientConfig;
pub use net::api::{ApiClient, ApiError};
