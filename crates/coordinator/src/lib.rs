//! Lifecycle coordination for celebrity video-message requests.
//!
//! A client asks a celebrity for a video message (optionally attaching a
//! video of their own), the celebrity replies with a recorded video, and
//! either side can fetch time-limited download URLs along the way. The
//! moving parts live in three stores with no shared transaction: video
//! blobs, metadata records, and a notification topic. This crate owns
//! the ordering discipline that keeps those stores coherent enough:
//! blobs before records, records before notifications, and notification
//! failures never failing the workflow.
//!
//! [`BlissCoordinator`] is the entry point; build one with
//! [`CoordinatorBuilder`] over whatever store implementations fit the
//! deployment (`bliss-*-memory` crates for tests, the S3/DynamoDB/SNS
//! crates in production).

mod config;
mod coordinator;
mod error;
mod receipt;
mod transcode;

pub use config::CoordinatorConfig;
pub use coordinator::{BlissCoordinator, CoordinatorBuilder};
pub use error::BlissError;
pub use receipt::{CancelReceipt, RequestReceipt, ResponseReceipt};
pub use transcode::{PassthroughTranscoder, Transcoder, TranscodeError};
