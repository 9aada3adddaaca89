//! # Timezone Time Service
//! 
//! A small HTTP service answering timezone-aware time queries.
//! 
//! ## Features
//! - Current time in any IANA timezone (`GET /api/current/{tz}`)
//! - Conversion of a timestamp between two timezones (`POST /api/convert`)
//! - Liveness check (`GET /health`)
//! - Automatic DST handling from the bundled timezone database

/// Configuration management and environment variables
pub mod config;
/// Client error taxonomy and its HTTP mapping
pub mod error;
/// Request and response bodies
pub mod models;
/// HTTP routing, health check, and timezone operations
pub mod services;
/// Utility functions for datetime, validation, and logging
pub mod utils;
