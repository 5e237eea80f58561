//! Metadata store trait for Bliss request/response records.
//!
//! Implementations persist flat request and response records keyed by
//! their time-derived ids, with store-side TTL expiry. No
//! optimistic-concurrency control is offered: last writer wins, and the
//! backing store's own per-key ordering is the only guarantee under
//! concurrent writers.

pub mod error;
pub mod store;

pub use error::MetadataError;
pub use store::RecordStore;
