//! Route (bookable experience) domain entities.

pub mod filter;
pub mod model;
pub mod state;

pub use filter::RouteFilter;
pub use model::{CreateRoute, DEFAULT_RATING, Route, UpdateRoute};
pub use state::RouteState;
