//! Out-of-order response guard.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one validation/lookup trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Hands out tickets and remembers the newest one.
///
/// A response may be applied only if its ticket is still current; any later
/// trigger (or an explicit invalidation) makes earlier tickets stale.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    latest: AtomicU64,
}

impl SequenceGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new trigger, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Makes all outstanding tickets stale without starting a trigger.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns true if `ticket` is the newest one issued.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}
