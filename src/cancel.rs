//! Component-Lifetime Cancellation
//!
//! Tasks spawned by hooks hold one of these and check it after every await,
//! so an unmounted component never writes state or keeps polling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let seen_by_task = token.clone();
        assert!(!seen_by_task.is_cancelled());
        token.cancel();
        assert!(seen_by_task.is_cancelled());
    }
}
