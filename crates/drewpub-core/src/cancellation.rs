use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Shared abort flag. Clones observe the same flag, so a backend or helper
/// thread can hold one while the engine cancels the session it belongs to.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
