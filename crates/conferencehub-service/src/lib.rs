//! # conferencehub-service
//!
//! Business logic service layer for ConferenceHub. Services validate caller
//! input, run the store operation, and hand committed snapshots to the
//! fan-out dispatcher once the store lock has been released.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod registration;
pub mod session;
pub mod slide;

pub use registration::RegistrationService;
pub use session::SessionService;
pub use slide::SlideService;
