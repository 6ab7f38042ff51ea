//! vaxview
//!
//! Search screen for a vaccination catalog: a query controller that re-derives its result
//! stream on every query change, and a pagination state machine for "load more".
//!
//! Pure core (`model`, `parser`, `state`, `view`) with the impure shell (`repository`,
//! `config`, `logging`, `integration`) around it.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod repository;
pub mod state;
pub mod view;

// Driver loop
pub mod integration;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
