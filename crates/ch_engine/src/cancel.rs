use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::error::{ChError, Result};

/// Cooperative cancellation signal shared between a caller and running
/// searches. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Fails with [`ChError::Cancelled`] once the token was cancelled
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ChError::Cancelled)
        } else {
            Ok(())
        }
    }
}
