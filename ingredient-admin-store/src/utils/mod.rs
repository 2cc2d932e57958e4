//! Utility modules.

/// Timestamp serialization helpers for stored rows.
pub mod datetime;

/// Log sanitization utilities to keep request and response bodies short in logs.
pub mod log_sanitizer;
