//! Catalog repository trait: vehicle CRUD.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{Car, CarId, CarUpdate, NewCar};

/// Repository trait for the vehicle catalog.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Check that the backing store is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All vehicles, in insertion order.
    async fn list_cars(&self) -> RepositoryResult<Vec<Car>>;

    /// Fetch a single vehicle.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no vehicle has this id
    async fn get_car(&self, id: CarId) -> RepositoryResult<Car>;

    /// Store a new vehicle and assign it a fresh id.
    ///
    /// Ids are never reused, even after deletions.
    async fn insert_car(&self, car: NewCar) -> RepositoryResult<Car>;

    /// Merge `update` into an existing vehicle and return the result.
    async fn update_car(&self, id: CarId, update: &CarUpdate) -> RepositoryResult<Car>;

    /// Remove a vehicle and return what was removed.
    ///
    /// Does **not** touch view events; see
    /// [`ViewRepository::purge_views`](super::ViewRepository::purge_views).
    async fn delete_car(&self, id: CarId) -> RepositoryResult<Car>;
}
