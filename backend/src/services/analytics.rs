//! View analytics aggregation engine.
//!
//! Pure functions over a catalog snapshot and a list of view events. Nothing
//! here fails: degenerate inputs (empty catalog, inverted window) produce
//! empty or absent values instead of errors.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::api::{
    AggregationWindow, AnalyticsResult, BrandStat, Car, CarId, DailyViews, PopularCar, ViewEvent,
};

/// Size of the popularity ranking.
pub const TOP_CARS_LIMIT: usize = 5;

/// Compute the dashboard dataset for `window`.
///
/// Catalog-level figures (`total_cars`, `avg_price`, `brand_stats`) ignore the
/// window; only view-derived figures are windowed. Events outside the window
/// are skipped, so callers may pass an unfiltered list.
pub fn compute_analytics(
    cars: &[Car],
    events: &[ViewEvent],
    window: &AggregationWindow,
) -> AnalyticsResult {
    let period_events: Vec<ViewEvent> = events
        .iter()
        .filter(|event| window.contains(event.timestamp))
        .copied()
        .collect();

    AnalyticsResult {
        total_cars: cars.len(),
        avg_price: average_price(cars),
        total_views: period_events.len(),
        brand_stats: brand_stats(cars),
        popular_cars: popular_cars(cars, &period_events, TOP_CARS_LIMIT),
        views_by_period: daily_series(window, &period_events),
    }
}

/// Arithmetic mean of every catalog price, `None` for an empty catalog.
pub fn average_price(cars: &[Car]) -> Option<f64> {
    if cars.is_empty() {
        return None;
    }
    Some(cars.iter().map(|car| car.price).sum::<f64>() / cars.len() as f64)
}

/// Vehicles per brand over the whole catalog, in order of first appearance.
pub fn brand_stats(cars: &[Car]) -> Vec<BrandStat> {
    let mut stats: Vec<BrandStat> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for car in cars {
        match index.get(car.brand.as_str()) {
            Some(&i) => stats[i].count += 1,
            None => {
                index.insert(car.brand.as_str(), stats.len());
                stats.push(BrandStat {
                    brand: car.brand.clone(),
                    count: 1,
                });
            }
        }
    }
    stats
}

/// The `limit` most viewed vehicles, ordered by views (desc) then id (asc).
///
/// Events whose car is no longer in the catalog are dropped at the join.
pub fn popular_cars(cars: &[Car], events: &[ViewEvent], limit: usize) -> Vec<PopularCar> {
    let mut counts: HashMap<CarId, usize> = HashMap::new();
    for event in events {
        *counts.entry(event.car_id).or_insert(0) += 1;
    }

    let catalog: HashMap<CarId, &Car> = cars.iter().map(|car| (car.id, car)).collect();
    let mut ranking: Vec<PopularCar> = counts
        .into_iter()
        .filter_map(|(id, views)| {
            catalog.get(&id).map(|car| PopularCar {
                car: (*car).clone(),
                views,
            })
        })
        .collect();

    ranking.sort_by(|a, b| b.views.cmp(&a.views).then(a.car.id.cmp(&b.car.id)));
    ranking.truncate(limit);
    ranking
}

/// One zero-seeded bucket per UTC day of `window`, ascending.
///
/// Events that land on a day outside the bucket set are dropped.
pub fn daily_series(window: &AggregationWindow, events: &[ViewEvent]) -> Vec<DailyViews> {
    let mut series: Vec<DailyViews> = window
        .days()
        .into_iter()
        .map(|date| DailyViews { date, views: 0 })
        .collect();
    let index: HashMap<NaiveDate, usize> = series
        .iter()
        .enumerate()
        .map(|(i, bucket)| (bucket.date, i))
        .collect();

    for event in events {
        if let Some(&i) = index.get(&event.timestamp.date_naive()) {
            series[i].views += 1;
        }
    }
    series
}
