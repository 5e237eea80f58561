//! S3-backed [`VideoStore`](bliss_blob::VideoStore) implementations.
//!
//! Two issuance mechanisms for download URLs, one contract shape:
//!
//! - [`S3VideoStore`] signs directly against the bucket via SDK
//!   presigning (request videos).
//! - [`CdnVideoStore`] stores bytes in the transcode output bucket but
//!   issues URLs for the CDN edge, signed with a separate key through an
//!   injected [`UrlSigner`](bliss_blob::UrlSigner) (response videos).

pub mod cdn;
pub mod config;
pub mod store;

pub use cdn::{CdnVideoStore, HmacUrlSigner};
pub use config::{CdnConfig, S3VideoConfig};
pub use store::S3VideoStore;
