//! Core traits defined in `conferencehub-core` and implemented by other crates.

pub mod channel;
pub mod probe;
pub mod storage;

pub use channel::{Delivery, FanoutChannel};
pub use probe::SecretProbe;
pub use storage::{SlideStorage, SlideUpload};
