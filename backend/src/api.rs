//! Public API surface for the dealership backend.
//!
//! This file consolidates the identifier newtypes and the DTO types that cross
//! the HTTP boundary. All types derive Serialize/Deserialize for JSON.

pub use crate::models::car::{Car, CarUpdate, NewCar};
pub use crate::models::user::{Credentials, NewUser, PublicUser, User, UserUpdate};
pub use crate::models::view::{AggregationWindow, ViewEvent};
pub use crate::routes::analytics::{AnalyticsResult, BrandStat, DailyViews, PopularCar};
pub use crate::routes::auth::LoginResponse;
pub use crate::routes::cars::CarRemoved;

crate::define_id_type!(i64, CarId, "Catalog vehicle identifier (primary key).");
crate::define_id_type!(i64, UserId, "Back-office user identifier (primary key).");
