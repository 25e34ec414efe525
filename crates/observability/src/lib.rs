//! Tracing/logging setup shared by the binaries.
//!
//! The output format is chosen by the caller (the API binary reads it from
//! `LOG_FORMAT` as part of its config).

pub mod subscriber;

pub use subscriber::{init, LogFormat};
