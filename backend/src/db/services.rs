//! High-level database operations.
//!
//! These functions work against any [`FullRepository`] and are what the HTTP
//! handlers and the server binary call. They own input validation, password
//! hashing, and the cross-collection rules: reading a car records a view, and
//! deleting a car purges its view history.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::Rng;

use super::repository::{
    CatalogRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    UserRepository, ViewRepository,
};
use crate::api::{
    AggregationWindow, AnalyticsResult, Car, CarId, CarUpdate, Credentials, NewCar, NewUser,
    PublicUser, User, UserId, UserUpdate,
};
use crate::routes::{analytics, auth, cars, users};
use crate::services::{self, auth as passwords};

/// The seeded administrator can never be deleted.
pub const ADMIN_USER_ID: UserId = UserId(1);

fn hashing_failed(err: passwords::AuthError, operation: &str) -> RepositoryError {
    RepositoryError::internal_with_context(
        err.to_string(),
        ErrorContext::new(operation).with_entity("user"),
    )
}

pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Catalog ====================

pub async fn list_cars(repo: &dyn FullRepository) -> RepositoryResult<Vec<Car>> {
    repo.list_cars()
        .await
        .map_err(|e| e.with_operation(cars::LIST_CARS))
}

/// Fetch a car and record one view for it.
pub async fn get_car(repo: &dyn FullRepository, id: CarId) -> RepositoryResult<Car> {
    let car = repo
        .record_catalog_view(id)
        .await
        .map_err(|e| e.with_operation(cars::GET_CAR))?;
    debug!("Recorded view for car {}", id);
    Ok(car)
}

pub async fn create_car(repo: &dyn FullRepository, car: NewCar) -> RepositoryResult<Car> {
    car.validate().map_err(|msg| {
        RepositoryError::validation_with_context(
            msg,
            ErrorContext::new(cars::CREATE_CAR).with_entity("car"),
        )
    })?;
    let created = repo.insert_car(car).await?;
    info!("Created car {} ({} {})", created.id, created.brand, created.model);
    Ok(created)
}

pub async fn update_car(
    repo: &dyn FullRepository,
    id: CarId,
    update: CarUpdate,
) -> RepositoryResult<Car> {
    update.validate().map_err(|msg| {
        RepositoryError::validation_with_context(
            msg,
            ErrorContext::new(cars::UPDATE_CAR)
                .with_entity("car")
                .with_entity_id(id),
        )
    })?;
    repo.update_car(id, &update)
        .await
        .map_err(|e| e.with_operation(cars::UPDATE_CAR))
}

/// Remove a car together with every view event that references it.
pub async fn delete_car(repo: &dyn FullRepository, id: CarId) -> RepositoryResult<Car> {
    let removed = repo
        .delete_car(id)
        .await
        .map_err(|e| e.with_operation(cars::DELETE_CAR))?;
    let purged = repo.purge_views(id).await?;
    info!("Deleted car {} and purged {} view events", id, purged);
    Ok(removed)
}

// ==================== Users ====================

pub async fn list_users(repo: &dyn FullRepository) -> RepositoryResult<Vec<PublicUser>> {
    let all = repo
        .list_users()
        .await
        .map_err(|e| e.with_operation(users::LIST_USERS))?;
    Ok(all.into_iter().map(PublicUser::from).collect())
}

pub async fn get_user(repo: &dyn FullRepository, id: UserId) -> RepositoryResult<PublicUser> {
    repo.get_user(id)
        .await
        .map(PublicUser::from)
        .map_err(|e| e.with_operation(users::GET_USER))
}

pub async fn create_user(repo: &dyn FullRepository, user: NewUser) -> RepositoryResult<PublicUser> {
    user.validate().map_err(|msg| {
        RepositoryError::validation_with_context(
            msg,
            ErrorContext::new(users::CREATE_USER).with_entity("user"),
        )
    })?;
    let hash = passwords::hash_password(&user.password)
        .map_err(|e| hashing_failed(e, users::CREATE_USER))?;
    let created = repo
        .insert_user(user.username.trim().to_string(), hash)
        .await
        .map_err(|e| e.with_operation(users::CREATE_USER))?;
    info!("Created user {} ({})", created.id, created.username);
    Ok(created.into())
}

pub async fn update_user(
    repo: &dyn FullRepository,
    id: UserId,
    update: UserUpdate,
) -> RepositoryResult<PublicUser> {
    update.validate().map_err(|msg| {
        RepositoryError::validation_with_context(
            msg,
            ErrorContext::new(users::UPDATE_USER)
                .with_entity("user")
                .with_entity_id(id),
        )
    })?;
    let hash = match update.password.as_deref() {
        Some(password) => Some(
            passwords::hash_password(password)
                .map_err(|e| hashing_failed(e, users::UPDATE_USER))?,
        ),
        None => None,
    };
    let username = update.username.map(|name| name.trim().to_string());
    repo.update_user(id, username, hash)
        .await
        .map(PublicUser::from)
        .map_err(|e| e.with_operation(users::UPDATE_USER))
}

pub async fn delete_user(repo: &dyn FullRepository, id: UserId) -> RepositoryResult<PublicUser> {
    if id == ADMIN_USER_ID {
        return Err(RepositoryError::validation_with_context(
            "The admin user cannot be deleted",
            ErrorContext::new(users::DELETE_USER)
                .with_entity("user")
                .with_entity_id(id),
        ));
    }
    let removed = repo
        .delete_user(id)
        .await
        .map_err(|e| e.with_operation(users::DELETE_USER))?;
    info!("Deleted user {} ({})", removed.id, removed.username);
    Ok(removed.into())
}

/// Resolve credentials to a user. `Ok(None)` means the username or password
/// did not match; the two cases are not distinguished.
pub async fn authenticate(
    repo: &dyn FullRepository,
    credentials: &Credentials,
) -> RepositoryResult<Option<User>> {
    let found = repo
        .find_user_by_username(credentials.username.trim())
        .await
        .map_err(|e| e.with_operation(auth::LOGIN))?;
    match found {
        Some(user) if passwords::verify_password(&user.password_hash, &credentials.password) => {
            Ok(Some(user))
        }
        Some(_) | None => {
            warn!("Rejected login for '{}'", credentials.username);
            Ok(None)
        }
    }
}

// ==================== Analytics ====================

/// Aggregate the catalog and the view events that fall inside `window`.
pub async fn get_analytics(
    repo: &dyn FullRepository,
    window: AggregationWindow,
) -> RepositoryResult<AnalyticsResult> {
    let catalog = repo
        .list_cars()
        .await
        .map_err(|e| e.with_operation(analytics::GET_ANALYTICS))?;
    let events = repo
        .query_range(window.start, window.end)
        .await
        .map_err(|e| e.with_operation(analytics::GET_ANALYTICS))?;
    debug!(
        "Aggregating {} cars and {} events over {} .. {}",
        catalog.len(),
        events.len(),
        window.start,
        window.end
    );
    Ok(services::compute_analytics(&catalog, &events, &window))
}

/// Backfill synthetic view history for the current catalog.
///
/// Returns the number of events written.
pub async fn seed_mock_views<R: Rng + Send + ?Sized>(
    repo: &dyn FullRepository,
    rng: &mut R,
    now: DateTime<Utc>,
) -> RepositoryResult<usize> {
    let catalog = repo.list_cars().await?;
    let events = services::generate_mock_views(&catalog, now, rng);
    for event in &events {
        repo.record_view_at(event.car_id, event.timestamp).await?;
    }
    info!(
        "Seeded {} mock view events across {} cars",
        events.len(),
        catalog.len()
    );
    Ok(events.len())
}
