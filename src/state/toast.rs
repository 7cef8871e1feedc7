//! Transient notifications shown in the corner of the screen

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of toasts on screen at once
pub const TOAST_LIMIT: usize = 3;
/// How long a toast stays before it is removed
pub const TOAST_REMOVE_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= TOAST_REMOVE_DELAY
    }
}

/// Newest-first queue capped at [`TOAST_LIMIT`]
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.push_at(level, message, Instant::now());
    }

    fn push_at(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) {
        self.toasts.push_front(Toast {
            level,
            message: message.into(),
            created_at: now,
        });
        self.toasts.truncate(TOAST_LIMIT);
    }

    /// Drop toasts older than [`TOAST_REMOVE_DELAY`]
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
