//! Load-more status snapshot.

use std::sync::atomic::{AtomicBool, Ordering};

/// Status of the "load more" pagination, as published to observers.
///
/// Immutable apart from the consume-once error flag: [`take_error`](Self::take_error) hands
/// out the error message the first time it is called on a snapshot and `None` afterwards.
/// Snapshots are shared behind `Arc`, so every observer of the same snapshot shares the flag.
#[derive(Debug)]
pub struct LoadMoreState {
    running: bool,
    error_message: Option<String>,
    handled_error: AtomicBool,
}

impl LoadMoreState {
    /// Snapshot with an unread error, if any.
    pub fn new(running: bool, error_message: Option<String>) -> Self {
        Self {
            running,
            error_message,
            handled_error: AtomicBool::new(false),
        }
    }

    /// No fetch in flight, no error.
    pub fn idle() -> Self {
        Self::new(false, None)
    }

    /// Fetch in flight.
    pub fn running() -> Self {
        Self::new(true, None)
    }

    /// Fetch finished with an error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(false, Some(message.into()))
    }

    /// A next-page fetch is in flight.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Error message, regardless of whether it was already taken.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Error message if not yet taken from this snapshot.
    pub fn take_error(&self) -> Option<&str> {
        if self.handled_error.swap(true, Ordering::AcqRel) {
            return None;
        }
        self.error_message.as_deref()
    }
}

impl PartialEq for LoadMoreState {
    /// Compares published content only; the consume-once flag is not part of equality.
    fn eq(&self, other: &Self) -> bool {
        self.running == other.running && self.error_message == other.error_message
    }
}

impl Eq for LoadMoreState {}
