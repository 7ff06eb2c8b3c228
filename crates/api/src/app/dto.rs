use serde::{Deserialize, Serialize};
use serde_json::Value;

use tiergate_purchasing::{ApprovalTier, EstimatedCost, InvalidCost, TierDecision};

// -------------------------
// Request DTOs
// -------------------------

/// `GET /approval-tier?cost=...`. Kept as text so bad input gets our error
/// body instead of the extractor's.
#[derive(Debug, Deserialize)]
pub struct ApprovalTierQuery {
    pub cost: Option<String>,
}

/// `POST /requests/evaluate`. The cost may arrive as a number or as numeric
/// text; anything else is an invalid cost, not a malformed body.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub estimated_cost: Option<Value>,
    #[serde(default)]
    pub is_new_record: bool,
}

impl EvaluateRequest {
    /// `Ok(None)` when the cost is absent or `null`.
    pub fn cost(&self) -> Result<Option<EstimatedCost>, InvalidCost> {
        let Some(raw) = &self.estimated_cost else {
            return Ok(None);
        };
        match raw {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| InvalidCost::Unparseable(n.to_string()))
                .and_then(EstimatedCost::new)
                .map(Some),
            Value::String(text) => text.parse().map(Some),
            other => Err(InvalidCost::Unparseable(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    /// Caller deadline; falls back to the configured lookup timeout.
    pub timeout_ms: Option<u64>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluated: bool,
    pub tier: Option<ApprovalTier>,
    pub approval_required: Option<bool>,
    pub auto_approve: bool,
    pub note: Option<String>,
}

impl EvaluateResponse {
    pub fn skipped() -> Self {
        Self {
            evaluated: false,
            tier: None,
            approval_required: None,
            auto_approve: false,
            note: None,
        }
    }
}

impl From<TierDecision> for EvaluateResponse {
    fn from(decision: TierDecision) -> Self {
        Self {
            evaluated: true,
            tier: Some(decision.tier),
            approval_required: Some(decision.approval_required),
            auto_approve: decision.auto_approve,
            note: decision.note,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub model_id: String,
    pub available: bool,
}
