//! Slide upload and thumbnail job hand-off.

pub mod service;

pub use service::SlideService;
