use std::sync::atomic::{AtomicBool, Ordering};

/// Mutual exclusion for one user action. A second attempt while the first
/// is running fails immediately instead of queueing.
#[derive(Debug)]
pub struct ActionLatch {
    name: &'static str,
    held: AtomicBool,
}

/// Releases its latch when dropped.
#[derive(Debug)]
pub struct LatchGuard<'a> {
    latch: &'a ActionLatch,
}

impl ActionLatch {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            held: AtomicBool::new(false),
        }
    }

    pub fn try_acquire(&self) -> Option<LatchGuard<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LatchGuard { latch: self })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.held.store(false, Ordering::Release);
    }
}
