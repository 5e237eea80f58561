//! SNS implementation of [`EventPublisher`](bliss_notify::EventPublisher).
//!
//! Each lifecycle event kind fans out to its own topic; downstream, a
//! notification service turns the JSON messages into push notifications
//! for the client and celebrity apps.

pub mod config;
pub mod publisher;

pub use config::SnsNotifierConfig;
pub use publisher::SnsPublisher;
