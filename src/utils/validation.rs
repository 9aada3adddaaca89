use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{ConversionQuery, ConvertRequest};

/// Checks the required fields of a conversion request in the order
/// `dt`, `from`, `to`, stopping at the first one that is missing. Only once
/// all three are present are their values required to be strings.
pub fn validate_convert_request(request: &ConvertRequest) -> ApiResult<ConversionQuery<'_>> {
    let dt = require_field(request.dt.as_ref(), "dt")?;
    let from = require_field(request.from.as_ref(), "from")?;
    let to = require_field(request.to.as_ref(), "to")?;

    Ok(ConversionQuery {
        dt: require_text(dt)?,
        from: require_text(from)?,
        to: require_text(to)?,
    })
}

fn require_field<'a>(value: Option<&'a Value>, field: &'static str) -> ApiResult<&'a Value> {
    value.ok_or(ApiError::MissingField { field })
}

fn require_text(value: &Value) -> ApiResult<&str> {
    value.as_str().ok_or(ApiError::InvalidBody)
}
