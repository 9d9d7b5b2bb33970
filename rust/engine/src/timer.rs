//! Delayed street advancement.
//!
//! When a betting round closes, the engine does not advance synchronously:
//! it arms this timer and the street changes when the driver polls past the
//! due time. The delay is pure pacing; correctness comes from two guards:
//! at most one pending advance exists at a time, and a pending advance is
//! keyed to the hand epoch it was computed against. The epoch moves only
//! when the pending street is superseded (a transition, a new hand, a
//! reset), so bookkeeping actions such as a blind change never invalidate
//! a scheduled advance.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Pending {
    epoch: u64,
    due: Instant,
}

/// Single-slot, epoch-keyed advance timer.
#[derive(Debug)]
pub struct AdvanceTimer {
    delay: Duration,
    pending: Option<Pending>,
}

impl AdvanceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules an advance for `epoch`, due `delay` after `now`.
    /// Does nothing while an advance is already pending, so repeated
    /// closure checks cannot stack transitions. Returns whether the timer
    /// was armed by this call.
    pub fn arm(&mut self, epoch: u64, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(Pending {
            epoch,
            due: now + self.delay,
        });
        true
    }

    /// Invalidates any pending advance.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consumes the pending advance if it is due. Returns true only when
    /// the advance was armed against `current_epoch`; a due-but-stale
    /// advance is discarded without firing.
    pub fn fire(&mut self, current_epoch: u64, now: Instant) -> bool {
        match self.pending {
            Some(p) if now >= p.due => {
                self.pending = None;
                p.epoch == current_epoch
            }
            _ => false,
        }
    }
}
