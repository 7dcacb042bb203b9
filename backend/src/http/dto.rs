//! Data Transfer Objects for the HTTP API.
//!
//! Resource payloads (cars, users, analytics) are re-exported from the
//! library since they already derive Serialize/Deserialize. This module only
//! adds the HTTP-specific shapes and query parsing.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::{
    AggregationWindow, AnalyticsResult, Car, CarRemoved, CarUpdate, Credentials, LoginResponse,
    NewCar, NewUser, PublicUser, UserUpdate,
};

use super::error::AppError;
use crate::models::view::MAX_WINDOW_DAYS;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Query string of `GET /cars/analytics`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AnalyticsQuery {
    /// Turn the raw bounds into a window, defaulting each missing bound.
    ///
    /// Windows spanning more than [`MAX_WINDOW_DAYS`] calendar days are
    /// rejected.
    pub fn to_window(
        &self,
        now: DateTime<Utc>,
        default_days: i64,
    ) -> Result<AggregationWindow, AppError> {
        let start = self
            .start_date
            .as_deref()
            .map(|raw| parse_bound(raw, Bound::Start))
            .transpose()?;
        let end = self
            .end_date
            .as_deref()
            .map(|raw| parse_bound(raw, Bound::End))
            .transpose()?;
        let window = AggregationWindow::resolve(start, end, now, default_days);
        if window.span_days() > MAX_WINDOW_DAYS {
            return Err(AppError::BadRequest(format!(
                "Analytics window spans {} days (maximum {})",
                window.span_days(),
                MAX_WINDOW_DAYS
            )));
        }
        Ok(window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 instant.
///
/// A bare date expands to the first millisecond of the day for a start bound
/// and the last millisecond for an end bound.
fn parse_bound(raw: &str, bound: Bound) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => NaiveTime::MIN,
            Bound::End => NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
                .ok_or_else(|| AppError::Internal("invalid end-of-day time".to_string()))?,
        };
        return Ok(Utc.from_utc_datetime(&date.and_time(time)));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| {
            let name = match bound {
                Bound::Start => "startDate",
                Bound::End => "endDate",
            };
            AppError::BadRequest(format!(
                "Invalid {}: '{}' (expected YYYY-MM-DD or RFC 3339)",
                name, raw
            ))
        })
}
