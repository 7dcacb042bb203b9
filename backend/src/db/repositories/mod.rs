//! Repository implementations module.
//!
//! - `local`: In-memory implementation for development and tests
pub mod local;

pub use local::LocalRepository;
