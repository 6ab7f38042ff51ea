//! Incremental "load more" pagination state machine.
//!
//! Owns at most one in-flight next-page subscription, keyed by the query it was issued for,
//! and publishes a [`LoadMoreState`] snapshot on every transition:
//!
//! - `reset()` → idle (`running = false`, no error, `has_more = true`)
//! - `query_next_page(q)` → running, unless `q` is already tracked
//! - success(`more`) → idle, `has_more = more`
//! - error(`msg`) → idle with `msg`, `has_more = true` so the UI can offer a retry
//! - absent emission → `reset()`
//!
//! Releasing the subscription while `has_more` is true forgets the tracked query, so the same
//! query can be requested again. When `has_more` is false the query stays tracked and further
//! requests for it are no-ops.
//!
//! Emissions only arrive through [`NextPageHandler::pump`], which runs on the owner's thread;
//! `&mut self` makes every transition run to completion before the next one starts.

use crate::model::Resource;
use crate::repository::{Delivery, ResourceStream, VaccinationRepository};
use crate::state::LoadMoreState;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// "Load more" state machine for one screen.
///
/// Publishes a fresh [`LoadMoreState`] on every transition; see the module docs for the table.
pub struct NextPageHandler {
    repository: Arc<dyn VaccinationRepository>,
    load_more_state: watch::Sender<Arc<LoadMoreState>>,
    has_more: bool,
    next_page: Option<ResourceStream<bool>>,
    query: Option<String>,
}

impl NextPageHandler {
    /// Idle handler fetching next pages from `repository`.
    pub fn new(repository: Arc<dyn VaccinationRepository>) -> Self {
        let (load_more_state, _) = watch::channel(Arc::new(LoadMoreState::idle()));
        let mut handler = Self {
            repository,
            load_more_state,
            has_more: true,
            next_page: None,
            query: None,
        };
        handler.reset();
        handler
    }

    /// Request the page after the current one for `query`.
    ///
    /// No-op if `query` is already tracked: either its fetch is still in flight, or it is
    /// known to be exhausted.
    pub fn query_next_page(&mut self, query: &str) {
        if self.query.as_deref() == Some(query) {
            debug!(query, "Next page already requested");
            return;
        }

        self.unregister();
        self.query = Some(query.to_string());
        self.next_page = Some(self.repository.next_page(query));
        debug!(query, "Next page requested");
        self.publish(LoadMoreState::running());
    }

    /// Apply one emission from the next-page stream.
    pub fn on_changed(&mut self, result: Option<Resource<bool>>) {
        match result {
            None => self.reset(),
            Some(Resource::Success(more)) => {
                self.has_more = more;
                self.unregister();
                debug!(more, "Next page loaded");
                self.publish(LoadMoreState::idle());
            }
            Some(Resource::Error { message, .. }) => {
                self.has_more = true;
                self.unregister();
                warn!(error = %message, "Next page failed");
                self.publish(LoadMoreState::failed(message));
            }
            Some(Resource::Loading(_)) => {}
        }
    }

    /// Deliver everything buffered on the live subscription.
    ///
    /// Returns the number of deliveries applied. A stream that closes before reporting an
    /// outcome is treated as an absent emission.
    pub fn pump(&mut self) -> usize {
        let mut delivered = 0;
        while let Some(stream) = &self.next_page {
            match stream.try_next() {
                Delivery::Item(item) => {
                    delivered += 1;
                    self.on_changed(item);
                }
                Delivery::Pending => break,
                Delivery::Closed => {
                    warn!(query = ?self.query, "Next page stream closed without outcome");
                    delivered += 1;
                    self.on_changed(None);
                }
            }
        }
        delivered
    }

    /// Back to idle: drop any live subscription and forget the tracked query.
    pub fn reset(&mut self) {
        self.unregister();
        self.has_more = true;
        self.query = None;
        self.publish(LoadMoreState::idle());
    }

    /// Whether the last outcome left pages to load. `true` until a page says otherwise.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Query the last request was issued for, while it is still tracked.
    pub fn tracked_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// A next-page subscription is live.
    pub fn is_loading(&self) -> bool {
        self.next_page.is_some()
    }

    /// Latest published snapshot.
    pub fn load_more_state(&self) -> Arc<LoadMoreState> {
        Arc::clone(&self.load_more_state.borrow())
    }

    /// Observe published snapshots. The current snapshot counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<Arc<LoadMoreState>> {
        self.load_more_state.subscribe()
    }

    fn unregister(&mut self) {
        // Dropping the stream is the cancellation; nothing is delivered after this point.
        if self.next_page.take().is_some() && self.has_more {
            self.query = None;
        }
    }

    fn publish(&self, state: LoadMoreState) {
        self.load_more_state.send_replace(Arc::new(state));
    }
}

impl std::fmt::Debug for NextPageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NextPageHandler")
            .field("has_more", &self.has_more)
            .field("query", &self.query)
            .field("subscribed", &self.next_page.is_some())
            .field("load_more_state", &*self.load_more_state.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "next_page_handler_tests.rs"]
mod tests;
