//! Load generations.
//!
//! Each loader tags its outstanding fetch with a ticket. A completion is
//! applied only while its ticket is still current; retries, remounts and
//! leaving a screen advance the generation so late responses are dropped.
//! Tickets are unique per process, so a loader rebuilt for a new screen
//! never accepts a ticket issued to its predecessor.

use std::sync::atomic::{AtomicU64, Ordering};

/// Next ticket to hand out. Zero is never issued.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Ticket identifying one fetch issued by a loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Per-loader generation counter.
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Starts a new load, invalidating any outstanding ticket.
    pub fn next(&mut self) -> LoadTicket {
        self.current = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        LoadTicket(self.current)
    }

    /// Invalidates the outstanding ticket without starting a new load.
    pub const fn invalidate(&mut self) {
        self.current = 0;
    }

    /// Whether `ticket` belongs to the latest load.
    #[must_use]
    pub const fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current != 0 && self.current == ticket.0
    }
}
