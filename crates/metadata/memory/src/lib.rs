//! In-memory [`RecordStore`](bliss_metadata::RecordStore) backed by
//! [`DashMap`](dashmap::DashMap), for tests and local development.

pub mod store;

pub use store::MemoryRecordStore;
