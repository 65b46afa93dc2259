//! Per-control busy flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Marks that an input-triggered send is outstanding for one control.
///
/// Clones share the same flag. Each binder owns its own flag, so sliders
/// never block each other.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag if it is clear. Returns `false` when already set.
    pub fn try_acquire(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Guard that clears the flag when dropped
    pub(crate) fn clear_on_drop(&self) -> ClearOnDrop {
        ClearOnDrop(self.clone())
    }
}

/// Clears the flag when the owning send completes, fails, or panics.
pub(crate) struct ClearOnDrop(BusyFlag);

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        self.0.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_exclusive() {
        let flag = BusyFlag::new();
        assert!(!flag.is_set());
        assert!(flag.try_acquire());
        assert!(!flag.try_acquire());
        assert!(flag.is_set());

        flag.release();
        assert!(!flag.is_set());
        assert!(flag.try_acquire());
    }

    #[test]
    fn test_guard_releases_shared_flag() {
        let flag = BusyFlag::new();
        let shared = flag.clone();
        assert!(flag.try_acquire());
        {
            let _guard = shared.clear_on_drop();
            assert!(flag.is_set());
        }
        assert!(!flag.is_set());
    }
}
