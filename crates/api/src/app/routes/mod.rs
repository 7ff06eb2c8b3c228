use axum::Router;

pub mod approvals;
pub mod stock;
pub mod system;

/// Router for the query endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(approvals::router())
        .nest("/stock", stock::router())
}
