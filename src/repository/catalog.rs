//! JSONL-catalog-backed repository.
//!
//! Each fetch runs on its own worker thread and re-reads the catalog file, so edits to the
//! file (or its removal) show up on the next fetch. Results are served in pages of
//! `page_size` records; the page cursor is kept per query.
//!
//! Search streams stay registered after their first page: when `next_page` extends the
//! result list for a query, every live search stream for that query receives the longer
//! list. Streams whose subscriber went away are pruned on that push.
//!
//! A query's cursor lives as long as some search stream for it does. Searching a query again
//! (a refresh) serves every page loaded so far rather than rewinding to the first one; a
//! query nobody listens to any more loses its cursor on the next search.

use crate::model::{CatalogError, Resource, Vaccination};
use crate::parser::parse_catalog;
use crate::repository::{ResourceSender, ResourceStream, VaccinationRepository};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Repository serving paged search results from a JSONL catalog file.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    path: PathBuf,
    page_size: usize,
    state: Mutex<PagingState>,
}

#[derive(Debug, Default)]
struct PagingState {
    /// Number of matches already served, per query.
    cursors: HashMap<String, usize>,
    listeners: HashMap<String, Vec<ResourceSender<Vec<Vaccination>>>>,
}

impl PagingState {
    /// Drop released listeners, then the cursors of queries left without any.
    ///
    /// `keep` retains its cursor regardless: it is the query being searched again.
    fn prune_released(&mut self, keep: &str) {
        self.listeners.retain(|_, senders| {
            senders.retain(|sender| !sender.is_released());
            !senders.is_empty()
        });
        let listeners = &self.listeners;
        self.cursors
            .retain(|query, _| query == keep || listeners.contains_key(query));
    }
}

impl CatalogRepository {
    /// Create a repository over `path`.
    ///
    /// The file is not touched until the first fetch. A `page_size` of zero is treated as one.
    pub fn new(path: impl Into<PathBuf>, page_size: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                path: path.into(),
                page_size: page_size.max(1),
                state: Mutex::new(PagingState::default()),
            }),
        }
    }

    /// Records served per page, after clamping.
    pub fn page_size(&self) -> usize {
        self.shared.page_size
    }

    /// Check that the catalog can currently be read and parsed.
    ///
    /// Returns the number of records.
    ///
    /// # Errors
    ///
    /// Returns the same [`CatalogError`] a fetch would report.
    pub fn validate(&self) -> Result<usize, CatalogError> {
        self.shared.load_all().map(|records| records.len())
    }
}

impl VaccinationRepository for CatalogRepository {
    fn search(&self, query: &str) -> ResourceStream<Vec<Vaccination>> {
        let (sender, stream) = ResourceStream::channel();
        let shared = Arc::clone(&self.shared);
        let query = query.to_string();
        thread::spawn(move || shared.run_search(&query, sender));
        stream
    }

    fn next_page(&self, query: &str) -> ResourceStream<bool> {
        let (sender, stream) = ResourceStream::channel();
        let shared = Arc::clone(&self.shared);
        let query = query.to_string();
        thread::spawn(move || shared.run_next_page(&query, sender));
        stream
    }
}

impl Shared {
    fn load_all(&self) -> Result<Vec<Vaccination>, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound {
                path: self.path.clone(),
            });
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        parse_catalog(&contents)
    }

    fn load_matches(&self, query: &str) -> Result<Vec<Vaccination>, CatalogError> {
        let needle = query.to_lowercase();
        let mut records = self.load_all()?;
        records.retain(|record| record.matches(&needle));
        Ok(records)
    }

    fn run_search(&self, query: &str, sender: ResourceSender<Vec<Vaccination>>) {
        if !sender.emit(Resource::loading()) {
            debug!(query, "Search released before start");
            return;
        }

        let matches = match self.load_matches(query) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(query, error = %e, "Search failed");
                sender.emit(Resource::error(e.to_string()));
                return;
            }
        };

        let mut state = self.state.lock();
        state.prune_released(query);
        let loaded = state.cursors.get(query).copied().unwrap_or_default();
        let served = loaded.max(self.page_size).min(matches.len());
        state.cursors.insert(query.to_string(), served);

        debug!(query, served, total = matches.len(), "Search served loaded pages");
        if sender.emit(Resource::Success(matches[..served].to_vec())) {
            state
                .listeners
                .entry(query.to_string())
                .or_default()
                .push(sender);
        }
    }

    fn run_next_page(&self, query: &str, sender: ResourceSender<bool>) {
        if !sender.emit(Resource::loading()) {
            debug!(query, "Next page released before start");
            return;
        }

        if !self.state.lock().cursors.contains_key(query) {
            debug!(query, "Next page requested for unknown query");
            sender.emit_absent();
            return;
        }

        let matches = match self.load_matches(query) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(query, error = %e, "Next page failed");
                sender.emit(Resource::error(e.to_string()));
                return;
            }
        };

        let mut state = self.state.lock();
        let cursor = state.cursors.get(query).copied().unwrap_or_default();

        if cursor >= matches.len() {
            drop(state);
            debug!(query, cursor, "No further pages");
            sender.emit(Resource::Success(false));
            return;
        }

        let served = (cursor + self.page_size).min(matches.len());
        state.cursors.insert(query.to_string(), served);

        let page = &matches[..served];
        if let Some(listeners) = state.listeners.get_mut(query) {
            listeners.retain(|listener| listener.emit(Resource::Success(page.to_vec())));
            if listeners.is_empty() {
                state.listeners.remove(query);
            }
        }
        drop(state);

        let more = served < matches.len();
        debug!(query, served, total = matches.len(), more, "Next page served");
        sender.emit(Resource::Success(more));
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
