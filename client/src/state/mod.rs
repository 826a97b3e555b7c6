//! Client-side state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` is the key-value backend, `session` the persisted auth state on
//! top of it, and `ui` the transient presentation state.

pub mod session;
pub mod storage;
pub mod ui;
