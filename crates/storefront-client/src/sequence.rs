//! Last-request-wins sequencing for overlapping fetches.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Hands out increasing tickets. Only the newest ticket may apply its
/// result, and nothing may apply once the sequencer is closed.
///
/// The methods take `&self`, so one sequencer can sit behind an `Arc` and
/// be shared by tasks that fetch concurrently. Owned by a view that is only
/// driven through `&mut`, the atomics add nothing beyond ordering.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
    closed: AtomicBool,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every earlier one.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a result for `ticket` should still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        !self.closed.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Marks the owner as torn down; every outstanding ticket goes stale.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
