//! Lifecycle event publisher trait for Bliss.
//!
//! Publishing is fire-and-forget from the coordinator's point of view:
//! at-most-once, best-effort delivery. A publish failure never rolls
//! back the upload or metadata write that triggered it.

pub mod error;
pub mod publisher;

pub use error::NotifyError;
pub use publisher::EventPublisher;
