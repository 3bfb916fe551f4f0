//! Best result across the searches of one batch.
//!
//! Workers report every finished search to a shared [`BestScoreTracker`].
//! Only solved searches count, and the record only moves when a search
//! needed strictly fewer tries. On a tie the index that reported first is
//! kept, whatever order the workers happened to finish in.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// Lowest try count among solved searches, with the combination index that
/// achieved it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BestScore {
    pub tries: u64,
    pub comb_idx: u32,
}

impl BestScore {
    /// Sentinel for "nothing solved yet".
    pub const NONE: BestScore = BestScore {
        tries: u64::MAX,
        comb_idx: u32::MAX,
    };

    pub fn is_found(&self) -> bool {
        *self != Self::NONE
    }
}

impl Default for BestScore {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for BestScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_found() {
            write!(f, "tries {:>11}, combIdx: {:>5}", self.tries, self.comb_idx)
        } else {
            write!(f, "tries {:>11}, combIdx: {:>5}", "not found", "none")
        }
    }
}

/// Shared, lock-protected [`BestScore`] for one batch.
#[derive(Debug, Default)]
pub struct BestScoreTracker {
    best: Mutex<BestScore>,
}

impl BestScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished search. Returns true if it became the new best.
    pub fn record(&self, found: bool, tries: u64, comb_idx: u32) -> bool {
        if !found {
            return false;
        }
        let mut best = lock_or_recover(&self.best);
        if tries < best.tries {
            *best = BestScore { tries, comb_idx };
            true
        } else {
            false
        }
    }

    /// Current best.
    pub fn best(&self) -> BestScore {
        *lock_or_recover(&self.best)
    }

    /// Consume the tracker at the end of a batch.
    pub fn into_best(self) -> BestScore {
        match self.best.into_inner() {
            Ok(best) => best,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Lock a mutex, recovering the guard if a worker panicked while holding it.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::error!("best score lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
