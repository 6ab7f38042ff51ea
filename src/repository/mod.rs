//! Data-fetching collaborators.
//!
//! The screen coordinator only sees [`VaccinationRepository`]; [`CatalogRepository`] is the
//! concrete implementation backed by a JSONL catalog file.

pub mod catalog;
pub mod stream;

pub use catalog::CatalogRepository;
pub use stream::{Delivery, ResourceSender, ResourceStream};

use crate::model::Vaccination;

/// Source of search results and "next page" signals.
///
/// Both operations return immediately with a stream; the work happens elsewhere and is
/// reported through the stream. Dropping the stream cancels interest in the outcome.
pub trait VaccinationRepository: Send + Sync {
    /// Fetch the first page of results for a non-blank, normalized query.
    ///
    /// The stream may keep emitting updated result lists as further pages are loaded.
    fn search(&self, query: &str) -> ResourceStream<Vec<Vaccination>>;

    /// Advance the page cursor for `query`.
    ///
    /// Terminal success payload is whether more pages remain. Emits the absent value when
    /// no search has been issued for `query`.
    fn next_page(&self, query: &str) -> ResourceStream<bool>;
}
