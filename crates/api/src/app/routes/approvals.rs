use axum::{
    Json, Router,
    extract::{Query, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, post},
};

use tiergate_purchasing::{EstimatedCost, tier};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/approval-tier", get(get_approval_tier))
        .route("/requests/evaluate", post(evaluate_request))
}

/// What tier would a request of this cost get?
pub async fn get_approval_tier(
    Query(query): Query<dto::ApprovalTierQuery>,
) -> axum::response::Response {
    let cost = match EstimatedCost::from_field(query.cost.as_deref()) {
        Ok(cost) => cost,
        Err(e) => return errors::invalid_cost_response(e),
    };

    match tier::approval_tier(cost.amount()) {
        Ok(assignment) => Json(assignment).into_response(),
        Err(e) => errors::invalid_cost_response(e),
    }
}

/// Dry-run of the record trigger: what would be written for this cost.
pub async fn evaluate_request(
    body: Result<Json<dto::EvaluateRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return errors::json_error(rejection.status(), "invalid_body", rejection.body_text());
        }
    };

    let cost = match body.cost() {
        Ok(cost) => cost,
        Err(e) => return errors::invalid_cost_response(e),
    };

    let response = match cost {
        Some(cost) => dto::EvaluateResponse::from(tier::decide(cost, body.is_new_record)),
        None => dto::EvaluateResponse::skipped(),
    };
    Json(response).into_response()
}
