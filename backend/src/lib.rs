//! # Dealership Backend
//!
//! REST backend for a car dealership catalog with view analytics.
//!
//! Every time a vehicle detail page is fetched, a view event is appended to an
//! in-memory event store. The analytics engine turns the catalog plus the
//! events inside a date window into a dashboard dataset: totals, average
//! price, vehicles per brand, the five most viewed vehicles and a zero-filled
//! daily view series.
//!
//! ## Architecture
//!
//! - [`api`]: public types shared by every layer
//! - [`models`]: domain entities and their validation rules
//! - [`routes`]: wire DTOs and operation names, grouped by resource
//! - [`db`]: repository traits, the in-memory repository and the service layer
//! - [`services`]: storage-agnostic logic (aggregation, mock views, auth)
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
