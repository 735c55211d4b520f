//! Hirebase payments - subscription checkout and payment-status webhooks
//! for the Hirebase recruitment platform.
//!
//! This library provides the payment transaction core: plan catalog lookup,
//! gateway checkout creation, webhook signature verification, status mapping,
//! and the payment record state machine.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod handlers;
pub mod id;
pub mod models;
