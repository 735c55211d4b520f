//! Payment gateway integration.
//!
//! `client` wraps the gateway's transaction-creation endpoint; `notification`
//! covers the inbound side: payload types, signature verification, and the
//! raw-to-canonical status mapping.

mod client;
mod notification;

pub use client::*;
pub use notification::*;
