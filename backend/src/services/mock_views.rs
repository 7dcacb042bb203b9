//! Synthetic view history for demo deployments.
//!
//! The generator is pure: it takes the catalog, a reference instant and a
//! random source, and returns backdated events. Persisting them is the
//! caller's job (see `db::services::seed_mock_views`).

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::api::{Car, ViewEvent};

/// Number of days of history, today included.
pub const MOCK_HISTORY_DAYS: i64 = 30;
/// Lower bound of the per-day event count (inclusive).
pub const MIN_DAILY_VIEWS: usize = 5;
/// Upper bound of the per-day event count (inclusive).
pub const MAX_DAILY_VIEWS: usize = 20;

/// Generate between 5 and 20 views for each of the last 30 UTC days.
///
/// Each event targets a uniformly chosen car at a random hour and minute of
/// its day, with seconds zeroed. An empty catalog yields no events.
pub fn generate_mock_views<R: Rng + ?Sized>(
    cars: &[Car],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ViewEvent> {
    if cars.is_empty() {
        return Vec::new();
    }

    let today = now.date_naive();
    let mut events = Vec::new();

    for offset in 0..MOCK_HISTORY_DAYS {
        let day = today - Duration::days(offset);
        let count = rng.gen_range(MIN_DAILY_VIEWS..=MAX_DAILY_VIEWS);

        for _ in 0..count {
            let Some(car) = cars.choose(rng) else {
                continue;
            };
            let hour = rng.gen_range(0..24);
            let minute = rng.gen_range(0..60);
            let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                continue;
            };
            let timestamp = Utc.from_utc_datetime(&day.and_time(time));
            events.push(ViewEvent::new(car.id, timestamp));
        }
    }

    events
}
