//! View event store trait.
//!
//! The store is an append-only log of `(car id, timestamp)` observations kept
//! in insertion order. There is no index: every query is a full scan.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::{Car, CarId, ViewEvent};

#[async_trait]
pub trait ViewRepository: Send + Sync {
    /// Append an event for `car_id` stamped with the current instant.
    ///
    /// No deduplication or rate limiting: every call adds one event.
    async fn record_view(&self, car_id: CarId) -> RepositoryResult<()>;

    /// Look up `car_id` in the catalog and, if present, append a view stamped
    /// now. Lookup and append happen atomically with respect to deletions, so
    /// a concurrently deleted car never leaves an event behind its purge.
    async fn record_catalog_view(&self, car_id: CarId) -> RepositoryResult<Car>;

    /// Append a backdated event. Used to seed synthetic history.
    async fn record_view_at(&self, car_id: CarId, timestamp: DateTime<Utc>)
        -> RepositoryResult<()>;

    /// Events with `start <= timestamp <= end`, in insertion order.
    async fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ViewEvent>>;

    /// Remove every event referencing `car_id`; returns how many were removed.
    ///
    /// The store does not observe catalog deletions on its own.
    async fn purge_views(&self, car_id: CarId) -> RepositoryResult<usize>;

    /// Total number of stored events, regardless of time.
    async fn view_count(&self) -> RepositoryResult<usize>;
}
