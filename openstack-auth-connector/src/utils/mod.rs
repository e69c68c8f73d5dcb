//! Utility modules.

/// Log sanitization utilities to keep credentials out of logs.
pub mod log_sanitizer;
