//! Screen state machines.
//!
//! Transitions run on the owner's thread; repository deliveries are applied by `pump()`.

pub mod load_more;
pub mod next_page_handler;
pub mod search_screen;

// Re-export for convenience
pub use load_more::LoadMoreState;
pub use next_page_handler::NextPageHandler;
pub use search_screen::{normalize_query, Results, SearchScreen};
