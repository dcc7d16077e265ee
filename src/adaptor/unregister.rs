//! Handle returned by listener registration.

use std::fmt;
use std::sync::{Mutex, PoisonError};

type DetachFn = Box<dyn FnOnce() + Send>;

/// Detaches one listener when [`unregister`](Self::unregister) is called.
///
/// The handle is idempotent: only the first call runs the detach step, later
/// calls are no-ops. Dropping the handle does *not* detach the listener.
pub struct Unregister {
    detach: Mutex<Option<DetachFn>>,
}

impl Unregister {
    pub fn new<F>(detach: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            detach: Mutex::new(Some(Box::new(detach))),
        }
    }

    /// Detach the listener. Safe to call more than once.
    pub fn unregister(&self) {
        // Release the lock before running the detach step so that it may
        // call back into this handle.
        let detach = self
            .detach
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(detach) = detach {
            detach();
        }
    }

    /// Returns `true` until [`unregister`](Self::unregister) has run.
    pub fn is_active(&self) -> bool {
        self.detach
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for Unregister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unregister")
            .field("active", &self.is_active())
            .finish()
    }
}
