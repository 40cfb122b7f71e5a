//! System-level modules
//!
//! Logging setup and other process-wide plumbing.

pub mod logging;

pub use logging::init_logging;
