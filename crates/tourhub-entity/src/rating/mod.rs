//! Rating domain entities.

pub mod model;

pub use model::{MAX_SCORE, MIN_SCORE, Rating, score_in_range};
