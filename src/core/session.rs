//! Request sequencing: "latest request wins".
//!
//! There is no way to cancel an in-flight remote call, so a stale response
//! can arrive after a newer request was issued. Each request takes a ticket
//! from a monotonic counter; a completion whose ticket is no longer the
//! newest is discarded instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RequestSeq {
    issued: AtomicU64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a new request, invalidating all earlier tickets.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether this ticket is still the most recently issued one.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket
    }
}
