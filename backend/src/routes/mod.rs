//! Wire-level data types and operation names, grouped by resource.

pub mod analytics;
pub mod auth;
pub mod cars;
pub mod users;
