//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer in [`crate::db::services`] for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::auth::AuthUser;
use super::dto::{
    AnalyticsQuery, AnalyticsResult, Car, CarRemoved, CarUpdate, Credentials, HealthResponse,
    LoginResponse, NewCar, NewUser, PublicUser, UserUpdate,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{CarId, UserId};
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Created (201) result type.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Auth
// =============================================================================

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> CreatedResult<LoginResponse> {
    let credentials = json_body(payload)?;
    let user = db_services::authenticate(state.repository.as_ref(), &credentials)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let access_token = state.tokens.issue(&user)?;
    tracing::info!(user = %user.username, "login succeeded");

    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            access_token,
            user: user.into(),
        }),
    ))
}

// =============================================================================
// Cars
// =============================================================================

/// GET /cars
pub async fn list_cars(State(state): State<AppState>) -> HandlerResult<Vec<Car>> {
    let cars = db_services::list_cars(state.repository.as_ref()).await?;
    Ok(Json(cars))
}

/// GET /cars/{id}
///
/// Every successful fetch counts as one view.
pub async fn get_car(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<Car> {
    let id = CarId::new(path_id(id)?);
    let car = db_services::get_car(state.repository.as_ref(), id).await?;
    Ok(Json(car))
}

/// POST /cars
pub async fn create_car(
    State(state): State<AppState>,
    _auth: AuthUser,
    payload: Result<Json<NewCar>, JsonRejection>,
) -> CreatedResult<Car> {
    let car = db_services::create_car(state.repository.as_ref(), json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// PATCH /cars/{id}
pub async fn update_car(
    State(state): State<AppState>,
    _auth: AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CarUpdate>, JsonRejection>,
) -> HandlerResult<Car> {
    let id = CarId::new(path_id(id)?);
    let car = db_services::update_car(state.repository.as_ref(), id, json_body(payload)?).await?;
    Ok(Json(car))
}

/// DELETE /cars/{id}
pub async fn delete_car(
    State(state): State<AppState>,
    _auth: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<CarRemoved> {
    let id = CarId::new(path_id(id)?);
    db_services::delete_car(state.repository.as_ref(), id).await?;
    Ok(Json(CarRemoved::new()))
}

/// GET /cars/analytics?startDate=&endDate=
pub async fn get_analytics(
    State(state): State<AppState>,
    _auth: AuthUser,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> HandlerResult<AnalyticsResult> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let window = query.to_window(Utc::now(), state.analytics_window_days)?;
    let result = db_services::get_analytics(state.repository.as_ref(), window).await?;
    Ok(Json(result))
}

// =============================================================================
// Users
// =============================================================================

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> HandlerResult<Vec<PublicUser>> {
    let users = db_services::list_users(state.repository.as_ref()).await?;
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<PublicUser> {
    let id = UserId::new(path_id(id)?);
    let user = db_services::get_user(state.repository.as_ref(), id).await?;
    Ok(Json(user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> CreatedResult<PublicUser> {
    let user = db_services::create_user(state.repository.as_ref(), json_body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> HandlerResult<PublicUser> {
    let id = UserId::new(path_id(id)?);
    let user = db_services::update_user(state.repository.as_ref(), id, json_body(payload)?).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> HandlerResult<PublicUser> {
    let id = UserId::new(path_id(id)?);
    let user = db_services::delete_user(state.repository.as_ref(), id).await?;
    Ok(Json(user))
}
