//! Core domain types for the Bliss video message lifecycle.
//!
//! A *Bliss request* is a client's ask for a short video message from a
//! celebrity (the responder), optionally carrying a video of its own. A
//! *Bliss response* is the responder's uploaded video reply. This crate
//! holds the records persisted in the metadata store, the lifecycle
//! events fanned out to the notification topic, and the identifier/clock
//! service that derives record ids and expiry timestamps from wall-clock
//! time.

pub mod clock;
pub mod event;
pub mod id;
pub mod record;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{EventKind, LifecycleEvent};
pub use id::{ID_EPOCH_OFFSET, IdAllocator, IdLease, RECORD_TTL_SECS};
pub use record::{RequestProjection, RequestRecord, RequestView, ResponseRecord};
