//! # tourhub-service
//!
//! Business logic service layer for TourHub. Each service orchestrates
//! repositories, authentication, and notifications to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod audit;
pub mod catalog;
pub mod checkin;
pub mod context;
pub mod events;
pub mod guard;
pub mod moderation;
pub mod notification;
pub mod rating;
pub mod reservation;

pub use account::AccountService;
pub use audit::AuditRecorder;
pub use catalog::CatalogService;
pub use checkin::CheckinService;
pub use context::RequestContext;
pub use events::EventBus;
pub use moderation::ModerationService;
pub use notification::NotificationService;
pub use rating::RatingService;
pub use reservation::ReservationService;
