//! Single-flight gate for long-running backend actions.

#[cfg(test)]
#[path = "busy_test.rs"]
mod busy_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "an action is in flight" flag.
///
/// Clones share the flag. Acquiring never waits: while held, further
/// [`BusyGate::try_acquire`] calls return `None`.
#[derive(Debug, Clone, Default)]
pub struct BusyGate {
    flag: Arc<AtomicBool>,
}

impl BusyGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Take the gate, or `None` if it is already held.
    #[must_use]
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| BusyGuard { flag: Arc::clone(&self.flag) })
    }
}

/// Releases the gate when dropped, on success and error paths alike.
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
