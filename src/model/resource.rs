//! Tagged fetch outcome.
//!
//! A [`Resource`] is what repository streams emit: a loading marker, a success payload, or an
//! error message. The "absent" state is not a variant; streams carry `Option<Resource<T>>` and
//! use `None` for it.

/// Outcome of a fetch, possibly still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    /// Fetch in flight. May carry stale data from a previous fetch.
    Loading(Option<T>),
    /// Fetch completed.
    Success(T),
    /// Fetch failed. May carry stale data from a previous fetch.
    Error {
        /// Human-readable failure description.
        message: String,
        /// Last known data, if any.
        data: Option<T>,
    },
}

impl<T> Resource<T> {
    /// Loading marker without stale data.
    pub fn loading() -> Self {
        Resource::Loading(None)
    }

    /// Error without stale data.
    pub fn error(message: impl Into<String>) -> Self {
        Resource::Error {
            message: message.into(),
            data: None,
        }
    }

    /// Fetch still in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading(_))
    }

    /// Payload, whether fresh (success) or stale (loading/error).
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            Resource::Loading(data) | Resource::Error { data, .. } => data.as_ref(),
        }
    }
}
