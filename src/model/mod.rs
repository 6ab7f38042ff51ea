//! Domain model types (pure).

pub mod command;
pub mod error;
pub mod resource;
pub mod vaccination;

// Re-export for convenience
pub use command::Command;
pub use error::{AppError, CatalogError};
pub use resource::Resource;
pub use vaccination::Vaccination;
