use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use tiergate_api::app::{build_app, services::AppServices};
use tiergate_core::ApplianceModelId;
use tiergate_infra::InMemoryInventoryUnits;
use tiergate_inventory::{
    InstallStatus, InventoryUnit, InventoryUnitSource, SourceError, StockAvailabilityGate,
};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(gate: StockAvailabilityGate) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(AppServices::new(gate));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_warehouse() -> Self {
        let model = |id: &str| ApplianceModelId::new(id).unwrap();
        let store = InMemoryInventoryUnits::with_units([
            InventoryUnit::new("u-1", model("fridge-10"), InstallStatus::IN_STOCK),
            InventoryUnit::new("u-2", model("oven-3"), InstallStatus::new("1")),
        ]);
        Self::spawn(StockAvailabilityGate::new(store)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Broken;

#[async_trait]
impl InventoryUnitSource for Broken {
    async fn find_in_stock_units(
        &self,
        _model_id: &ApplianceModelId,
    ) -> Result<Vec<InventoryUnit>, SourceError> {
        Err(SourceError::Query("relation \"appliance_units\" does not exist".to_string()))
    }
}

struct Hanging;

#[async_trait]
impl InventoryUnitSource for Hanging {
    async fn find_in_stock_units(
        &self,
        _model_id: &ApplianceModelId,
    ) -> Result<Vec<InventoryUnit>, SourceError> {
        std::future::pending().await
    }
}

async fn get_json(url: String) -> (StatusCode, Value) {
    let res = reqwest::get(url).await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::with_warehouse().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn approval_tier_query_uses_thresholds() {
    let srv = TestServer::with_warehouse().await;

    for (cost, tier, required) in [
        ("0", "none", false),
        ("499.99", "none", false),
        ("500", "supervisor", true),
        ("1500", "supervisor", true),
        ("1999.99", "supervisor", true),
        ("2000", "dual", true),
    ] {
        let (status, body) = get_json(format!("{}/approval-tier?cost={cost}", srv.base_url)).await;
        assert_eq!(status, StatusCode::OK, "cost {cost}");
        assert_eq!(body, json!({ "tier": tier, "approval_required": required }), "cost {cost}");
    }
}

#[tokio::test]
async fn approval_tier_rejects_bad_costs() {
    let srv = TestServer::with_warehouse().await;

    for query in ["", "?cost=", "?cost=-5", "?cost=abc", "?cost=NaN"] {
        let (status, body) = get_json(format!("{}/approval-tier{query}", srv.base_url)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {query:?}");
        assert_eq!(body["error"], "invalid_cost", "query {query:?}");
    }
}

#[tokio::test]
async fn evaluate_reports_auto_approval_for_new_records_only() {
    let srv = TestServer::with_warehouse().await;
    let client = reqwest::Client::new();
    let url = format!("{}/requests/evaluate", srv.base_url);

    let res = client
        .post(&url)
        .json(&json!({ "estimated_cost": 100.0, "is_new_record": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["evaluated"], true);
    assert_eq!(body["tier"], "none");
    assert_eq!(body["auto_approve"], true);
    assert_eq!(body["note"], "Auto-approved: Purchase is under $500 threshold.");

    let body: Value = client
        .post(&url)
        .json(&json!({ "estimated_cost": 100.0, "is_new_record": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["auto_approve"], false);
    assert_eq!(body["note"], Value::Null);
}

#[tokio::test]
async fn evaluate_skips_unset_cost_and_rejects_negative() {
    let srv = TestServer::with_warehouse().await;
    let client = reqwest::Client::new();
    let url = format!("{}/requests/evaluate", srv.base_url);

    let body: Value = client
        .post(&url)
        .json(&json!({ "estimated_cost": null, "is_new_record": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["evaluated"], false);
    assert_eq!(body["tier"], Value::Null);

    let res = client
        .post(&url)
        .json(&json!({ "estimated_cost": -1.0, "is_new_record": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_cost");
}

#[tokio::test]
async fn stock_lookup_answers_true_and_false() {
    let srv = TestServer::with_warehouse().await;

    let (status, body) = get_json(format!("{}/stock/fridge-10", srv.base_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "model_id": "fridge-10", "available": true }));

    let (_, body) = get_json(format!("{}/stock/oven-3", srv.base_url)).await;
    assert_eq!(body["available"], false);

    let (_, body) = get_json(format!("{}/stock/unknown-model", srv.base_url)).await;
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn blank_model_id_is_rejected() {
    let srv = TestServer::with_warehouse().await;
    let (status, body) = get_json(format!("{}/stock/%20%20", srv.base_url)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_model_id");
}

#[tokio::test]
async fn lookup_failure_is_bad_gateway() {
    let srv = TestServer::spawn(StockAvailabilityGate::new(Broken)).await;
    let (status, body) = get_json(format!("{}/stock/fridge-10", srv.base_url)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "lookup_failure");
}

#[tokio::test]
async fn caller_timeout_is_gateway_timeout() {
    let gate = StockAvailabilityGate::new(Hanging).with_default_timeout(Duration::from_secs(30));
    let srv = TestServer::spawn(gate).await;

    let (status, body) =
        get_json(format!("{}/stock/fridge-10?timeout_ms=25", srv.base_url)).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "lookup_timeout");
}

#[tokio::test]
async fn evaluate_accepts_numeric_text_and_rejects_other_costs_as_invalid_cost() {
    let srv = TestServer::with_warehouse().await;
    let client = reqwest::Client::new();
    let url = format!("{}/requests/evaluate", srv.base_url);

    let res = client
        .post(&url)
        .json(&json!({ "estimated_cost": "100", "is_new_record": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["tier"], "none");
    assert_eq!(body["auto_approve"], true);

    let bad_costs = [
        json!("abc"),
        json!("12abc"),
        json!(""),
        json!("1e400"),
        json!(true),
        json!([1]),
    ];
    for bad in bad_costs {
        let res = client
            .post(&url)
            .json(&json!({ "estimated_cost": bad, "is_new_record": true }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "cost {bad}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_cost", "cost {bad}");
    }
}

#[tokio::test]
async fn malformed_evaluate_body_gets_a_json_error() {
    let srv = TestServer::with_warehouse().await;
    let res = reqwest::Client::new()
        .post(format!("{}/requests/evaluate", srv.base_url))
        .header("content-type", "application/json")
        .body(r#"{"estimated_cost": 1e400}"#)
        .send()
        .await
        .unwrap();

    assert!(res.status().is_client_error());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_body");
}
