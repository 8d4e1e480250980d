//! Swipe engine: one dish at a time, resolved by a left/right gesture.
//!
//! Resolving a gesture sets the transient swipe direction and hands out a
//! [`SettleTicket`]. Presenting the resolved swipe takes a settle delay;
//! when it elapses the ticket is redeemed, the direction clears and the index
//! advances modulo the catalog size.
//!
//! At most one settle is pending per card. Gestures that arrive while a
//! settle is pending are ignored, and tickets that do not match the pending
//! one (including tickets from a torn-down engine) are no-ops.

use std::num::NonZeroUsize;

use tracing::{debug, trace};
use u_cook_core::SwipeDirection;

/// Proof that a swipe was accepted and may later advance the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleTicket {
    engine: u64,
    seq: u64,
}

impl SettleTicket {
    /// Id of the engine that issued the ticket.
    #[must_use]
    pub const fn engine(&self) -> u64 {
        self.engine
    }
}

/// Outcome of redeeming a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The engine advanced to the given index.
    Advanced(usize),
    /// The ticket was not the pending one.
    Stale,
}

/// Swipe state for one presentation of the main screen.
#[derive(Debug, Clone)]
pub struct SwipeEngine {
    id: u64,
    index: usize,
    len: NonZeroUsize,
    direction: Option<SwipeDirection>,
    pending: Option<SettleTicket>,
    next_seq: u64,
}

impl SwipeEngine {
    /// Create an engine over `len` dishes.
    ///
    /// `id` distinguishes this engine from earlier ones so their tickets
    /// cannot advance it.
    #[must_use]
    pub const fn new(id: u64, len: NonZeroUsize) -> Self {
        Self {
            id,
            index: 0,
            len,
            direction: None,
            pending: None,
            next_seq: 0,
        }
    }

    /// Resolve a gesture on the current card.
    ///
    /// Returns `None` if a settle is already pending for this card.
    pub fn resolve(&mut self, direction: SwipeDirection) -> Option<SettleTicket> {
        if self.pending.is_some() {
            debug!(%direction, index = self.index, "Ignoring swipe while settling");
            return None;
        }

        let ticket = SettleTicket {
            engine: self.id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.direction = Some(direction);
        self.pending = Some(ticket);
        trace!(%direction, index = self.index, seq = ticket.seq, "Swipe resolved");
        Some(ticket)
    }

    /// Redeem a settle ticket: clear the direction and advance.
    pub fn settle(&mut self, ticket: SettleTicket) -> Settle {
        if self.pending != Some(ticket) {
            trace!(?ticket, "Stale settle ticket");
            return Settle::Stale;
        }

        self.pending = None;
        self.direction = None;
        self.index = (self.index + 1) % self.len.get();
        Settle::Advanced(self.index)
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Index of the card on screen.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Direction of the swipe being presented, if any.
    #[must_use]
    pub const fn direction(&self) -> Option<SwipeDirection> {
        self.direction
    }

    #[must_use]
    pub const fn is_settling(&self) -> bool {
        self.pending.is_some()
    }
}
