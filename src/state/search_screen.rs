//! Search screen coordinator.
//!
//! Holds the normalized query, derives the primary result stream from it, and owns the
//! [`NextPageHandler`] for "load more". Everything the rendering layer needs is exposed as
//! `tokio::sync::watch` receivers, so any number of observers see the latest value.
//!
//! Deliveries from repository streams are applied only inside [`SearchScreen::pump`].

use crate::model::{Resource, Vaccination};
use crate::repository::{Delivery, ResourceStream, VaccinationRepository};
use crate::state::{LoadMoreState, NextPageHandler};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Latest primary result. `None` is the absent state (no query, or blank query).
pub type Results = Option<Resource<Vec<Vaccination>>>;

/// Case-fold and trim user input.
pub fn normalize_query(input: &str) -> String {
    input.to_lowercase().trim().to_string()
}

/// Query controller for the search screen.
///
/// Single owner: every mutation takes `&mut self`, and observers read through the watch
/// receivers or the snapshot getters.
pub struct SearchScreen {
    repository: Arc<dyn VaccinationRepository>,
    query: watch::Sender<Option<String>>,
    results: watch::Sender<Results>,
    /// Subscription to the stream derived from the current query.
    results_stream: Option<ResourceStream<Vec<Vaccination>>>,
    /// Derived stream has not delivered anything yet.
    results_pending: bool,
    next_page: NextPageHandler,
}

impl SearchScreen {
    /// Screen with no query, absent results and idle pagination.
    pub fn new(repository: Arc<dyn VaccinationRepository>) -> Self {
        let (query, _) = watch::channel(None);
        let (results, _) = watch::channel(None);
        Self {
            next_page: NextPageHandler::new(Arc::clone(&repository)),
            repository,
            query,
            results,
            results_stream: None,
            results_pending: false,
        }
    }

    /// Search for `input`.
    ///
    /// No-op if it normalizes to the current query. Otherwise pagination is reset and the
    /// result stream is re-derived.
    pub fn set_query(&mut self, input: &str) {
        let normalized = normalize_query(input);
        if self.query.borrow().as_deref() == Some(normalized.as_str()) {
            debug!(query = %normalized, "Query unchanged");
            return;
        }

        self.next_page.reset();
        self.publish(normalized);
    }

    /// Re-derive the result stream for the current query, if one is set.
    ///
    /// Pagination state is left alone.
    pub fn refresh(&mut self) {
        let current = self.query.borrow().clone();
        if let Some(query) = current {
            debug!(query = %query, "Refreshing");
            self.publish(query);
        }
    }

    /// Request the next page for the current query. No-op without a non-blank query.
    pub fn load_next_page(&mut self) {
        let current = self.query.borrow().clone();
        match current {
            Some(query) if !query.trim().is_empty() => self.next_page.query_next_page(&query),
            _ => debug!("Load more ignored without a query"),
        }
    }

    /// Apply everything buffered on the next-page and result streams.
    ///
    /// The next-page stream is drained first: a repository pushes extended results before
    /// reporting the page outcome, so they are picked up in the same call.
    ///
    /// Returns the number of deliveries applied.
    pub fn pump(&mut self) -> usize {
        let mut delivered = self.next_page.pump();
        while let Some(stream) = &self.results_stream {
            match stream.try_next() {
                Delivery::Item(item) => {
                    delivered += 1;
                    self.results_pending = false;
                    self.results.send_replace(item);
                }
                Delivery::Pending => break,
                Delivery::Closed => {
                    // Last value stays published.
                    self.results_pending = false;
                    self.results_stream = None;
                }
            }
        }
        delivered
    }

    /// Nothing in flight: results are not loading and no next page is outstanding.
    pub fn is_settled(&self) -> bool {
        let results_loading = self
            .results
            .borrow()
            .as_ref()
            .is_some_and(Resource::is_loading);
        !self.results_pending && !results_loading && !self.next_page.is_loading()
    }

    /// Current normalized query. `None` until the first `set_query`.
    pub fn query(&self) -> Option<String> {
        self.query.borrow().clone()
    }

    /// Latest primary result.
    pub fn results(&self) -> Results {
        self.results.borrow().clone()
    }

    /// Latest load-more snapshot.
    pub fn load_more_state(&self) -> Arc<LoadMoreState> {
        self.next_page.load_more_state()
    }

    /// See [`NextPageHandler::has_more`].
    pub fn has_more(&self) -> bool {
        self.next_page.has_more()
    }

    /// Observe query changes, including re-publishes from [`refresh`](Self::refresh).
    pub fn watch_query(&self) -> watch::Receiver<Option<String>> {
        self.query.subscribe()
    }

    /// Observe primary results.
    pub fn watch_results(&self) -> watch::Receiver<Results> {
        self.results.subscribe()
    }

    /// Observe load-more snapshots.
    pub fn watch_load_more(&self) -> watch::Receiver<Arc<LoadMoreState>> {
        self.next_page.subscribe()
    }

    /// Read-only view of the pagination state machine.
    pub fn next_page_handler(&self) -> &NextPageHandler {
        &self.next_page
    }

    fn publish(&mut self, query: String) {
        // Switch: the previous derived stream is released before the new one is created.
        self.results_stream = None;
        let stream = if query.trim().is_empty() {
            ResourceStream::absent()
        } else {
            self.repository.search(&query)
        };
        debug!(query = %query, "Query published");
        self.results_stream = Some(stream);
        self.results_pending = true;
        self.query.send_replace(Some(query));
    }
}

#[cfg(test)]
#[path = "search_screen_tests.rs"]
mod tests;
