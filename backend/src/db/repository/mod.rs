//! Repository trait definitions.
//!
//! Storage is split into focused traits so each concern can be implemented and
//! tested on its own:
//!
//! - [`error`]: Error types for repository operations
//! - [`catalog`]: Vehicle CRUD
//! - [`users`]: Back-office users
//! - [`views`]: Append-only view event store
//!
//! # Convenience Trait Bound
//!
//! For code that needs every capability, use [`FullRepository`]:
//!
//! ```ignore
//! async fn delete_and_purge<R: FullRepository + ?Sized>(repo: &R, id: CarId) -> RepositoryResult<()> {
//!     repo.delete_car(id).await?;
//!     repo.purge_views(id).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod users;
pub mod views;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use catalog::CatalogRepository;
pub use users::UserRepository;
pub use views::ViewRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all three traits.
pub trait FullRepository: CatalogRepository + UserRepository + ViewRepository {}

impl<T> FullRepository for T where T: CatalogRepository + UserRepository + ViewRepository {}
