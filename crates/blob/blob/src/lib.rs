//! Video blob storage traits for Bliss.
//!
//! Request and response videos are content-addressed by their
//! time-derived ids. Download access is granted through time-limited
//! signed URLs; the signing mechanism differs per store (direct bucket
//! presigning for request videos, CDN-edge signing for transcoded
//! response videos) but both honor the same [`SignedUrl`] contract.

pub mod error;
pub mod signer;
pub mod store;
pub mod types;

pub use error::BlobError;
pub use signer::UrlSigner;
pub use store::VideoStore;
pub use types::SignedUrl;
