//! In-memory [`EventPublisher`](bliss_notify::EventPublisher) that
//! records published events, for tests and local development.

pub mod publisher;

pub use publisher::MemoryPublisher;
