//! In-memory local repository implementation.
//!
//! All data lives in memory behind a single `parking_lot::RwLock`, which makes
//! the store safe to share across the multi-threaded tokio runtime: appends and
//! purges take the write lock, scans take the read lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::api::{Car, CarId, CarUpdate, NewCar, User, UserId, ViewEvent};
use crate::db::repository::*;

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same data, so a single instance
/// can be handed to the HTTP state and to startup seeding alike.
///
/// # Example
/// ```
/// use dealership::db::repositories::LocalRepository;
/// use dealership::db::repository::ViewRepository;
/// use dealership::api::CarId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// repo.record_view(CarId::new(1)).await.unwrap();
/// assert_eq!(repo.view_count().await.unwrap(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    cars: Vec<Car>,
    users: Vec<User>,
    views: Vec<ViewEvent>,

    // ID counters
    next_car_id: i64,
    next_user_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            cars: Vec::new(),
            users: Vec::new(),
            views: Vec::new(),
            next_car_id: 1,
            next_user_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn car_count(&self) -> usize {
        self.data.read().cars.len()
    }

    pub fn user_count(&self) -> usize {
        self.data.read().users.len()
    }

    fn check_health(data: &LocalData) -> RepositoryResult<()> {
        if !data.is_healthy {
            return Err(RepositoryError::internal("Repository is not healthy"));
        }
        Ok(())
    }

    fn car_not_found(id: CarId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Car {} not found", id),
            ErrorContext::new(operation)
                .with_entity("car")
                .with_entity_id(id),
        )
    }

    fn user_not_found(id: UserId, operation: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("User {} not found", id),
            ErrorContext::new(operation)
                .with_entity("user")
                .with_entity_id(id),
        )
    }

    fn username_taken(username: &str, operation: &str) -> RepositoryError {
        RepositoryError::conflict_with_context(
            format!("Username '{}' already exists", username),
            ErrorContext::new(operation).with_entity("user"),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_cars(&self) -> RepositoryResult<Vec<Car>> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.cars.clone())
    }

    async fn get_car(&self, id: CarId) -> RepositoryResult<Car> {
        let data = self.data.read();
        Self::check_health(&data)?;
        data.cars
            .iter()
            .find(|car| car.id == id)
            .cloned()
            .ok_or_else(|| Self::car_not_found(id, "get_car"))
    }

    async fn insert_car(&self, car: NewCar) -> RepositoryResult<Car> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        let id = CarId::new(data.next_car_id);
        data.next_car_id += 1;

        let car = car.into_car(id);
        data.cars.push(car.clone());
        Ok(car)
    }

    async fn update_car(&self, id: CarId, update: &CarUpdate) -> RepositoryResult<Car> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        let car = data
            .cars
            .iter_mut()
            .find(|car| car.id == id)
            .ok_or_else(|| Self::car_not_found(id, "update_car"))?;
        update.apply_to(car);
        Ok(car.clone())
    }

    async fn delete_car(&self, id: CarId) -> RepositoryResult<Car> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        let index = data
            .cars
            .iter()
            .position(|car| car.id == id)
            .ok_or_else(|| Self::car_not_found(id, "delete_car"))?;
        Ok(data.cars.remove(index))
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.users.clone())
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        let data = self.data.read();
        Self::check_health(&data)?;
        data.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| Self::user_not_found(id, "get_user"))
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(
        &self,
        username: String,
        password_hash: String,
    ) -> RepositoryResult<User> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        if data.users.iter().any(|u| u.username == username) {
            return Err(Self::username_taken(&username, "insert_user"));
        }

        let user = User {
            id: UserId::new(data.next_user_id),
            username,
            password_hash,
        };
        data.next_user_id += 1;
        data.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(
        &self,
        id: UserId,
        username: Option<String>,
        password_hash: Option<String>,
    ) -> RepositoryResult<User> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        if let Some(ref name) = username {
            if data.users.iter().any(|u| u.id != id && &u.username == name) {
                return Err(Self::username_taken(name, "update_user"));
            }
        }

        let user = data
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| Self::user_not_found(id, "update_user"))?;
        if let Some(name) = username {
            user.username = name;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<User> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        let index = data
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| Self::user_not_found(id, "delete_user"))?;
        Ok(data.users.remove(index))
    }
}

#[async_trait]
impl ViewRepository for LocalRepository {
    async fn record_view(&self, car_id: CarId) -> RepositoryResult<()> {
        self.record_view_at(car_id, Utc::now()).await
    }

    async fn record_catalog_view(&self, car_id: CarId) -> RepositoryResult<Car> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        let car = data
            .cars
            .iter()
            .find(|car| car.id == car_id)
            .cloned()
            .ok_or_else(|| Self::car_not_found(car_id, "record_catalog_view"))?;
        data.views.push(ViewEvent::new(car_id, Utc::now()));
        Ok(car)
    }

    async fn record_view_at(
        &self,
        car_id: CarId,
        timestamp: DateTime<Utc>,
    ) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        data.views.push(ViewEvent::new(car_id, timestamp));
        Ok(())
    }

    async fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<ViewEvent>> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data
            .views
            .iter()
            .filter(|event| start <= event.timestamp && event.timestamp <= end)
            .copied()
            .collect())
    }

    async fn purge_views(&self, car_id: CarId) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        Self::check_health(&data)?;
        let before = data.views.len();
        data.views.retain(|event| event.car_id != car_id);
        Ok(before - data.views.len())
    }

    async fn view_count(&self) -> RepositoryResult<usize> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.views.len())
    }
}
