//! Shared session state
//!
//! The only state the inbound and outbound loops share is the name of
//! the channel shown in the divider.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Active channel cell, cloned into both chat loops
///
/// The value is only ever read whole or replaced whole, so the cell can
/// never be observed empty.
#[derive(Debug, Clone)]
pub struct SessionState {
    channel: Arc<Mutex<String>>,
}

impl SessionState {
    /// Create the cell holding the channel new sessions start in
    pub fn new(default_channel: impl Into<String>) -> Self {
        Self {
            channel: Arc::new(Mutex::new(default_channel.into())),
        }
    }

    /// Current channel name
    pub fn read(&self) -> String {
        self.lock().clone()
    }

    /// Replace the current channel, returning the previous one
    pub fn swap(&self, channel: impl Into<String>) -> String {
        std::mem::replace(&mut *self.lock(), channel.into())
    }

    // A panic elsewhere while holding the lock cannot leave a partial
    // value behind, so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, String> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
