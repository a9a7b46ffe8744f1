//! # conferencehub-store
//!
//! The in-memory heart of ConferenceHub: sessions, registrations, and the
//! derived registration count that ties them together.
//!
//! - [`allocator`] hands out strictly increasing integer ids, never reissued
//! - [`sessions`] and [`registrations`] are the two tables
//! - [`ConferenceStore`] serializes every read and write across both tables
//!   behind one async mutex
//! - [`seed`] loads the optional startup session file

pub mod allocator;
pub mod registrations;
pub mod seed;
pub mod sessions;
pub mod store;

pub use store::ConferenceStore;
