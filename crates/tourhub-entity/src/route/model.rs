//! Route entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::state::RouteState;

/// Aggregate rating shown for a route with no reviews yet.
pub const DEFAULT_RATING: f64 = 4.5;

/// A bookable guided experience offered by a host.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Route {
    /// Unique route identifier.
    pub id: Uuid,
    /// Route name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Destination (city/region), matched exactly by catalog filters.
    pub destination: String,
    /// Tour duration in hours.
    pub duration_hours: i32,
    /// Per-person price in currency minor units.
    pub price_per_person: i64,
    /// Maximum simultaneous headcount (>= 1).
    pub max_capacity: i32,
    /// Arithmetic mean of rating scores, or the 4.5 sentinel when none.
    pub rating: f64,
    /// Number of ratings received.
    pub review_count: i32,
    /// The owning host.
    pub owner_id: Uuid,
    /// Lifecycle state.
    pub state: RouteState,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Points of interest along the route.
    pub points_of_interest: Vec<String>,
    /// Image reference strings (URLs or local upload paths).
    pub image_urls: Vec<String>,
    /// When the route was created.
    pub created_at: DateTime<Utc>,
    /// When the route was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoute {
    /// Route name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Destination.
    pub destination: String,
    /// Duration in hours.
    pub duration_hours: i32,
    /// Per-person price in minor units.
    pub price_per_person: i64,
    /// Maximum headcount.
    pub max_capacity: i32,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Points of interest.
    pub points_of_interest: Vec<String>,
    /// Image references.
    pub image_urls: Vec<String>,
}

/// Partial update applied to an existing route. `None` fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoute {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New destination.
    pub destination: Option<String>,
    /// New duration in hours.
    pub duration_hours: Option<i32>,
    /// New per-person price. Existing reservations keep their frozen price.
    pub price_per_person: Option<i64>,
    /// New maximum headcount.
    pub max_capacity: Option<i32>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// Replacement points of interest.
    pub points_of_interest: Option<Vec<String>>,
    /// Replacement image references.
    pub image_urls: Option<Vec<String>>,
}
