use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tiergate_inventory::StockLookupError;
use tiergate_purchasing::InvalidCost;

pub fn invalid_cost_response(err: InvalidCost) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_cost", err.to_string())
}

pub fn stock_error_to_response(err: StockLookupError) -> axum::response::Response {
    match err {
        StockLookupError::LookupFailure(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "lookup_failure", msg)
        }
        StockLookupError::Timeout(_) => {
            json_error(StatusCode::GATEWAY_TIMEOUT, "lookup_timeout", err.to_string())
        }
        // The client went away or the pipeline aborted; nobody reads this.
        StockLookupError::Cancelled => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "lookup_cancelled",
            err.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
