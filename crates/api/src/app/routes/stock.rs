use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use tiergate_core::ApplianceModelId;
use tiergate_inventory::LookupOptions;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/:model_id", get(get_stock_availability))
}

/// If the client disconnects, axum drops this future and the lookup with it.
pub async fn get_stock_availability(
    Extension(services): Extension<Arc<AppServices>>,
    Path(model_id): Path<String>,
    Query(query): Query<dto::StockQuery>,
) -> axum::response::Response {
    let model_id = match ApplianceModelId::new(model_id) {
        Ok(id) => id,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_model_id", e.to_string());
        }
    };

    let mut options = LookupOptions::default();
    if let Some(ms) = query.timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    match services
        .stock_gate
        .is_stock_available_with(&model_id, options)
        .await
    {
        Ok(available) => Json(dto::StockResponse {
            model_id: model_id.to_string(),
            available,
        })
        .into_response(),
        Err(e) => errors::stock_error_to_response(e),
    }
}
