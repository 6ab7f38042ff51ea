//! Resource streams and their subscriptions.
//!
//! A [`ResourceStream`] is the receiving half of a fetch: the repository keeps the
//! [`ResourceSender`], the consumer keeps the stream. Holding the stream *is* the
//! subscription. Dropping it cancels: no further item is ever delivered, and the producer's
//! next [`ResourceSender::emit`] reports the disconnect so it can stop working.
//!
//! Streams are drained without blocking through [`ResourceStream::try_next`], so delivery
//! happens on whichever thread owns the stream, one item at a time.

use crate::model::Resource;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// One item pulled from a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<T> {
    /// An emission. `None` is the explicit absent value.
    Item(Option<Resource<T>>),
    /// Nothing buffered right now; the producer is still alive.
    Pending,
    /// Producer gone and buffer drained. Nothing will ever arrive.
    Closed,
}

/// Receiving half of a resource fetch.
#[derive(Debug)]
pub struct ResourceStream<T> {
    rx: Receiver<Option<Resource<T>>>,
    /// Dropped with the stream; senders watch it through a `Weak`.
    _alive: Arc<()>,
}

/// Producing half of a resource fetch.
#[derive(Debug)]
pub struct ResourceSender<T> {
    tx: Sender<Option<Resource<T>>>,
    alive: Weak<()>,
}

impl<T> Clone for ResourceSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            alive: Weak::clone(&self.alive),
        }
    }
}

impl<T> ResourceStream<T> {
    /// Create a connected sender/stream pair.
    pub fn channel() -> (ResourceSender<T>, Self) {
        let (tx, rx) = mpsc::channel();
        let alive = Arc::new(());
        let sender = ResourceSender {
            tx,
            alive: Arc::downgrade(&alive),
        };
        (sender, Self { rx, _alive: alive })
    }

    /// Sentinel stream: emits a single absent value, then closes.
    ///
    /// Represents "not applicable" (e.g. blank query), distinct from loading or error.
    pub fn absent() -> Self {
        let (sender, stream) = Self::channel();
        sender.emit_absent();
        stream
    }

    /// Pull the next buffered item without blocking.
    pub fn try_next(&self) -> Delivery<T> {
        match self.rx.try_recv() {
            Ok(item) => Delivery::Item(item),
            Err(TryRecvError::Empty) => Delivery::Pending,
            Err(TryRecvError::Disconnected) => Delivery::Closed,
        }
    }

    /// Wait up to `timeout` for the next item.
    pub fn next_timeout(&self, timeout: Duration) -> Delivery<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(item) => Delivery::Item(item),
            Err(RecvTimeoutError::Timeout) => Delivery::Pending,
            Err(RecvTimeoutError::Disconnected) => Delivery::Closed,
        }
    }
}

impl<T> ResourceSender<T> {
    /// Emit a resource. Returns `false` once the subscriber has released the stream.
    pub fn emit(&self, resource: Resource<T>) -> bool {
        self.tx.send(Some(resource)).is_ok()
    }

    /// Emit the absent value. Returns `false` once the subscriber has released the stream.
    pub fn emit_absent(&self) -> bool {
        self.tx.send(None).is_ok()
    }

    /// The subscriber has dropped the stream. Checked without sending anything.
    pub fn is_released(&self) -> bool {
        self.alive.strong_count() == 0
    }
}
