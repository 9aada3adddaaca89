use axum::response::Json;
use serde::{Deserialize, Serialize};

/// Fixed liveness payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving
    pub status: String,
}

/// `GET /health`. If this endpoint responds, the service is alive.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
