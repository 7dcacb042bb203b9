//! Storage layer for the catalog, the users and the view event store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / server binary                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - validation and password hashing                      │
//! │  - view recording and purge-on-delete                   │
//! │  - analytics orchestration                              │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The repository is constructed once by the caller and passed around as an
//! `Arc<dyn FullRepository>`; there is no process-wide instance.
//!
//! ```
//! use dealership::db::{seed, services, LocalRepository};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repo = LocalRepository::new();
//! seed::seed_defaults(&repo, "admin123").await.unwrap();
//! let cars = services::list_cars(&repo).await.unwrap();
//! assert_eq!(cars.len(), 3);
//! # });
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;
pub mod seed;
pub mod services;


pub use repositories::LocalRepository;
pub use repository::{
    CatalogRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    UserRepository, ViewRepository,
};
pub use services::{get_analytics, health_check, list_cars};
