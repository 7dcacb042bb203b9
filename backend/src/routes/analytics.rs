use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::Car;

// =========================================================
// Analytics types
// =========================================================

/// Number of catalog vehicles per brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandStat {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "quantidade")]
    pub count: usize,
}

/// A vehicle together with its view count inside the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularCar {
    pub car: Car,
    pub views: usize,
}

/// View count for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: usize,
}

/// Complete dashboard dataset.
///
/// `total_cars`, `avg_price` and `brand_stats` describe the whole catalog;
/// the remaining fields only count views inside the requested window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub total_cars: usize,
    /// `None` when the catalog is empty.
    pub avg_price: Option<f64>,
    pub total_views: usize,
    pub brand_stats: Vec<BrandStat>,
    pub popular_cars: Vec<PopularCar>,
    pub views_by_period: Vec<DailyViews>,
}

pub const GET_ANALYTICS: &str = "get_analytics";
