//! In-memory [`VideoStore`](bliss_blob::VideoStore) backed by
//! [`DashMap`](dashmap::DashMap), for tests and local development.

pub mod store;

pub use store::MemoryVideoStore;
