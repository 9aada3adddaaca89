use tracing::{debug, info, warn};

/// Logs an incoming API request with consistent format
pub fn log_request_start(endpoint: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("REQUEST: {} - {}", endpoint, d),
        None => debug!("REQUEST: {}", endpoint),
    }
}

/// Logs a successfully answered request with consistent format
pub fn log_request_success(endpoint: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("REQUEST_OK: {} - {}", endpoint, d),
        None => info!("REQUEST_OK: {}", endpoint),
    }
}

/// Logs a request rejected with a client error
pub fn log_request_rejected(endpoint: &str, error: &str) {
    warn!("REQUEST_REJECTED: {} - {}", endpoint, error);
}

/// Logs validation errors with consistent format
pub fn log_validation_error(endpoint: &str, field: &str, value: &str, error: &str) {
    warn!(
        "VALIDATION_ERROR: {} - field '{}' value '{}' invalid: {}",
        endpoint, field, value, error
    );
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
