//! `DynamoDB` implementation of [`RecordStore`](bliss_metadata::RecordStore).
//!
//! Records are flat string/number/boolean attribute items. TTL is the
//! table's job: `EXPIRE_TIME` holds epoch seconds for the native TTL
//! reaper, and expired items additionally read as missing so a stale
//! reaper never leaks dead records to callers.

pub mod config;
pub mod store;

pub use config::DynamoMetadataConfig;
pub use store::DynamoRecordStore;
