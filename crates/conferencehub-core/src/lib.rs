//! # conferencehub-core
//!
//! Core crate for ConferenceHub. Contains seam traits, configuration
//! schemas, typed identifiers, registration events, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other ConferenceHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
