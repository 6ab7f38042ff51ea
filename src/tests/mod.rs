//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the state machines through the scripted repository, which is only
//! visible inside the crate.
