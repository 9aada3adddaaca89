use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{Map, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult};
use crate::models::{ConvertRequest, ConvertResponse, CurrentTimeResponse};
use crate::services::health::health_check;
use crate::services::timezone::{self, TimezoneService};
use crate::utils::logging::{
    log_request_rejected, log_request_start, log_request_success, log_validation_error,
};
use crate::utils::validation::validate_convert_request;

const CURRENT_ENDPOINT: &str = "GET /api/current";
const CONVERT_ENDPOINT: &str = "POST /api/convert";

/// State shared by every handler. Read-only.
#[derive(Clone)]
pub struct AppState {
    /// Current-time lookups
    pub timezones: TimezoneService,
}

/// The complete HTTP API
pub struct HttpService {
    /// Router ready to hand to `axum::serve`
    pub router: Router,
}

impl HttpService {
    /// API backed by the system clock
    pub fn new() -> Self {
        Self::with_timezone_service(TimezoneService::new())
    }

    /// API backed by the given timezone service
    pub fn with_timezone_service(timezones: TimezoneService) -> Self {
        let state = AppState { timezones };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/api/current/*tz", get(current_time))
            .route("/api/convert", post(convert_time))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

impl Default for HttpService {
    fn default() -> Self {
        Self::new()
    }
}

async fn current_time(
    State(state): State<AppState>,
    Path(tz): Path<String>,
) -> ApiResult<Json<CurrentTimeResponse>> {
    log_request_start(CURRENT_ENDPOINT, Some(&tz));

    match state.timezones.current_time(&tz) {
        Ok(response) => {
            log_request_success(CURRENT_ENDPOINT, Some(&response.timezone));
            Ok(Json(response))
        }
        Err(error) => {
            log_request_rejected(CURRENT_ENDPOINT, &error.to_string());
            Err(error)
        }
    }
}

/// The body is decoded by hand rather than through the `Json` extractor so
/// that clients omitting the `Content-Type` header are still served.
async fn convert_time(body: Bytes) -> ApiResult<Json<ConvertResponse>> {
    log_request_start(CONVERT_ENDPOINT, None);

    let request = decode_convert_request(&body).map_err(|e| {
        log_request_rejected(CONVERT_ENDPOINT, &format!("undecodable body: {}", e));
        ApiError::InvalidBody
    })?;

    let result =
        validate_convert_request(&request).and_then(|query| timezone::convert_time(&query));

    match result {
        Ok(response) => {
            let details = format!("{} from {} to {}", response.input, response.from, response.to);
            log_request_success(CONVERT_ENDPOINT, Some(&details));
            Ok(Json(response))
        }
        Err(error) => {
            log_conversion_error(&request, &error);
            Err(error)
        }
    }
}

/// Only a top-level JSON object is accepted; its field values are left
/// untyped for [`validate_convert_request`].
fn decode_convert_request(body: &[u8]) -> serde_json::Result<ConvertRequest> {
    let object: Map<String, Value> = serde_json::from_slice(body)?;
    serde_json::from_value(Value::Object(object))
}

fn log_conversion_error(request: &ConvertRequest, error: &ApiError) {
    let message = error.to_string();
    match error {
        ApiError::MissingField { field } => {
            log_validation_error(CONVERT_ENDPOINT, field, "<absent>", &message)
        }
        ApiError::InvalidDatetime => log_validation_error(
            CONVERT_ENDPOINT,
            "dt",
            request.dt.as_ref().and_then(Value::as_str).unwrap_or_default(),
            &message,
        ),
        _ => log_request_rejected(CONVERT_ENDPOINT, &message),
    }
}
