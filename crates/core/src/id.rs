use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use crate::clock::Clock;

/// Reference instant subtracted from unix seconds so ids are small
/// positive integers rather than full timestamps. Changing this breaks
/// the invertibility of every id already issued.
pub const ID_EPOCH_OFFSET: i64 = 880_831_800;

/// Default record time-to-live. Production policy is under review;
/// the current policy is one hour.
pub const RECORD_TTL_SECS: i64 = 3600;

/// A freshly allocated identifier and the expiry timestamp that goes
/// with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdLease {
    /// Seconds since [`ID_EPOCH_OFFSET`].
    pub id: i64,
    /// Unix timestamp after which the record is eligible for store-side
    /// deletion. Always exactly `created_at + ttl`.
    pub expires_at: i64,
}

/// Derives request/response identifiers and expiry timestamps from
/// wall-clock time.
///
/// Ids are `now_seconds - ID_EPOCH_OFFSET`: roughly time-ordered and
/// invertible back to a creation timestamp via [`IdAllocator::issued_at`].
/// Two allocations within the same wall second would collide on the raw
/// derivation, so the allocator keeps an atomic watermark of the last
/// issued id and bumps a colliding allocation to the next unissued
/// second. Uniqueness holds per process only; replicas sharing a store
/// can still collide, and the backing store's last-writer-wins ordering
/// is the only guarantee then.
pub struct IdAllocator {
    clock: Arc<dyn Clock>,
    ttl_secs: i64,
    last_issued: AtomicI64,
}

impl std::fmt::Debug for IdAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdAllocator")
            .field("ttl_secs", &self.ttl_secs)
            .field("last_issued", &self.last_issued.load(Ordering::SeqCst))
            .finish()
    }
}

impl IdAllocator {
    /// Create an allocator over the given clock with the default TTL.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, RECORD_TTL_SECS)
    }

    /// Create an allocator with an explicit TTL in seconds.
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl_secs: i64) -> Self {
        Self {
            clock,
            ttl_secs,
            last_issued: AtomicI64::new(i64::MIN),
        }
    }

    /// Allocate the next identifier and its expiry timestamp.
    pub fn allocate(&self) -> IdLease {
        let candidate = self.clock.now_epoch() - ID_EPOCH_OFFSET;
        let id = self
            .last_issued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last.saturating_add(1)))
            })
            .map_or(candidate, |last| candidate.max(last.saturating_add(1)));

        IdLease {
            id,
            expires_at: id + ID_EPOCH_OFFSET + self.ttl_secs,
        }
    }

    /// Invert an identifier back to the instant it encodes.
    pub fn issued_at(id: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt((id + ID_EPOCH_OFFSET) * 1000)
            .single()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn allocator_at(now: i64) -> (Arc<ManualClock>, IdAllocator) {
        let clock = Arc::new(ManualClock::new(now));
        let allocator = IdAllocator::new(Arc::clone(&clock) as Arc<dyn Clock>);
        (clock, allocator)
    }

    #[test]
    fn id_is_seconds_minus_offset() {
        let (_, allocator) = allocator_at(ID_EPOCH_OFFSET + 12_345);
        let lease = allocator.allocate();
        assert_eq!(lease.id, 12_345);
    }

    #[test]
    fn expiry_is_created_at_plus_ttl_exactly() {
        let now = ID_EPOCH_OFFSET + 500;
        let (_, allocator) = allocator_at(now);
        let lease = allocator.allocate();
        assert_eq!(lease.expires_at, now + RECORD_TTL_SECS);
    }

    #[test]
    fn same_second_allocations_are_distinct_and_increasing() {
        let (_, allocator) = allocator_at(ID_EPOCH_OFFSET + 100);
        let a = allocator.allocate();
        let b = allocator.allocate();
        let c = allocator.allocate();
        assert_eq!(a.id, 100);
        assert_eq!(b.id, 101);
        assert_eq!(c.id, 102);
    }

    #[test]
    fn bumped_id_keeps_expiry_invariant() {
        let (_, allocator) = allocator_at(ID_EPOCH_OFFSET + 100);
        allocator.allocate();
        let bumped = allocator.allocate();
        // The expiry is anchored to the derived creation second, not the
        // wall second the call happened in.
        assert_eq!(bumped.expires_at, bumped.id + ID_EPOCH_OFFSET + RECORD_TTL_SECS);
    }

    #[test]
    fn clock_progress_wins_over_watermark() {
        let (clock, allocator) = allocator_at(ID_EPOCH_OFFSET + 100);
        allocator.allocate();
        clock.advance(60);
        let later = allocator.allocate();
        assert_eq!(later.id, 160);
    }

    #[test]
    fn issued_at_inverts_the_id() {
        let (_, allocator) = allocator_at(ID_EPOCH_OFFSET + 7_200);
        let lease = allocator.allocate();
        let at = IdAllocator::issued_at(lease.id);
        assert_eq!(at.timestamp(), ID_EPOCH_OFFSET + 7_200);
    }

    #[test]
    fn custom_ttl_is_honored() {
        let clock = Arc::new(ManualClock::new(ID_EPOCH_OFFSET + 9));
        let allocator = IdAllocator::with_ttl(clock, 7 * 24 * 3600);
        let lease = allocator.allocate();
        assert_eq!(lease.expires_at - (lease.id + ID_EPOCH_OFFSET), 7 * 24 * 3600);
    }
}
