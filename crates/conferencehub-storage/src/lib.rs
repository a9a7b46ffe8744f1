//! # conferencehub-storage
//!
//! Slide storage for ConferenceHub. Uploaded files are written through the
//! [`SlideStorage`](conferencehub_core::traits::SlideStorage) trait; the
//! local filesystem provider is the only backend shipped here.

pub mod object_path;
pub mod providers;

pub use object_path::slide_object_path;
pub use providers::local::LocalSlideStorage;
