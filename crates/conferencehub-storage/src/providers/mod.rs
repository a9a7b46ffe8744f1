//! Storage backend implementations.

pub mod local;
