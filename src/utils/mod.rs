/// ISO-8601 parsing and formatting
pub mod datetime;
/// Consistent log line helpers
pub mod logging;
/// Request field validation
pub mod validation;
