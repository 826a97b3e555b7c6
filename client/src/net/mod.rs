//! Networking for the `/api/v1` REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `api` the authenticated request facade,
//! `storefront` the typed endpoint methods, and `types` the wire schema.

pub mod api;
pub mod storefront;
pub mod transport;
pub mod types;
