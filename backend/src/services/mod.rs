//! Service layer for business logic.
//!
//! These modules are storage-agnostic: they operate on plain values and leave
//! persistence to the repository layer in [`crate::db`].

pub mod analytics;
pub mod auth;
pub mod mock_views;

pub use analytics::{compute_analytics, TOP_CARS_LIMIT};
pub use auth::{hash_password, verify_password, AuthError, Claims, TokenService};
pub use mock_views::generate_mock_views;
