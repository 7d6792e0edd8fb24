//! Catalog filter parameters.

use serde::{Deserialize, Serialize};

/// AND-combined filters applied on top of the visibility predicate when
/// listing routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteFilter {
    /// Exact destination match.
    pub destination: Option<String>,
    /// Maximum per-person price (inclusive).
    pub max_price: Option<i64>,
    /// Free-text search over name, description, and destination.
    pub q: Option<String>,
    /// Tag membership.
    pub tag: Option<String>,
}
