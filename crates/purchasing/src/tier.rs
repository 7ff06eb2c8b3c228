//! Approval tier classification.
//!
//! This module owns the one and only threshold table. The standalone query
//! ([`approval_tier`]), the record trigger ([`evaluate`], used by
//! [`crate::request::ProcurementRequest`]) and the HTTP layer all end up in
//! [`ApprovalTier::for_cost`].

use serde::{Deserialize, Serialize};

use crate::cost::{EstimatedCost, InvalidCost};

/// Costs at or above this need a supervisor.
pub const SUPERVISOR_THRESHOLD: f64 = 500.0;

/// Costs at or above this need two approvers.
pub const DUAL_THRESHOLD: f64 = 2000.0;

/// Work note appended to a new request that is approved without human review.
pub const AUTO_APPROVAL_NOTE: &str = "Auto-approved: Purchase is under $500 threshold.";

/// Approval category assigned from the estimated cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalTier {
    None,
    Supervisor,
    Dual,
}

impl ApprovalTier {
    /// Ranges are half-open and cover `[0, inf)` with no gaps:
    /// `[0, 500)` none, `[500, 2000)` supervisor, `[2000, inf)` dual.
    pub fn for_cost(cost: EstimatedCost) -> Self {
        let amount = cost.amount();
        if amount < SUPERVISOR_THRESHOLD {
            ApprovalTier::None
        } else if amount < DUAL_THRESHOLD {
            ApprovalTier::Supervisor
        } else {
            ApprovalTier::Dual
        }
    }

    pub fn requires_approval(self) -> bool {
        !matches!(self, ApprovalTier::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalTier::None => "none",
            ApprovalTier::Supervisor => "supervisor",
            ApprovalTier::Dual => "dual",
        }
    }
}

impl core::fmt::Display for ApprovalTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answer to "what tier would this cost get?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignment {
    pub tier: ApprovalTier,
    pub approval_required: bool,
}

/// Full classification outcome, including the auto-approval effect the record
/// layer must apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDecision {
    pub tier: ApprovalTier,
    pub approval_required: bool,
    pub auto_approve: bool,
    pub note: Option<String>,
}

impl TierDecision {
    pub fn assignment(&self) -> TierAssignment {
        TierAssignment {
            tier: self.tier,
            approval_required: self.approval_required,
        }
    }
}

/// Classify a raw cost, validating it first.
pub fn classify(total_cost: f64, is_new_record: bool) -> Result<TierDecision, InvalidCost> {
    EstimatedCost::new(total_cost).map(|cost| decide(cost, is_new_record))
}

/// Classify an already validated cost.
///
/// Only a brand-new record under the supervisor threshold is auto-approved;
/// updates never are.
pub fn decide(cost: EstimatedCost, is_new_record: bool) -> TierDecision {
    let tier = ApprovalTier::for_cost(cost);
    let auto_approve = tier == ApprovalTier::None && is_new_record;

    tracing::debug!(
        cost = cost.amount(),
        tier = tier.as_str(),
        is_new_record,
        auto_approve,
        "classified procurement cost"
    );

    TierDecision {
        tier,
        approval_required: tier.requires_approval(),
        auto_approve,
        note: auto_approve.then(|| AUTO_APPROVAL_NOTE.to_string()),
    }
}

/// Standalone tier lookup with no record side effects.
pub fn approval_tier(total_cost: f64) -> Result<TierAssignment, InvalidCost> {
    classify(total_cost, false).map(|decision| decision.assignment())
}

/// Record trigger entry point.
///
/// An unset cost is not evaluated at all (`Ok(None)`), leaving the record's
/// approval fields as they were.
pub fn evaluate(
    estimated_cost: Option<f64>,
    is_new_record: bool,
) -> Result<Option<TierDecision>, InvalidCost> {
    match estimated_cost {
        Some(cost) => classify(cost, is_new_record).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_of(cost: f64) -> ApprovalTier {
        classify(cost, false).unwrap().tier
    }

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(tier_of(0.0), ApprovalTier::None);
        assert_eq!(tier_of(499.99), ApprovalTier::None);
        assert_eq!(tier_of(500.0), ApprovalTier::Supervisor);
        assert_eq!(tier_of(1999.99), ApprovalTier::Supervisor);
        assert_eq!(tier_of(2000.0), ApprovalTier::Dual);
        assert_eq!(tier_of(1_000_000.0), ApprovalTier::Dual);
    }

    #[test]
    fn approval_required_follows_tier() {
        assert!(!classify(100.0, false).unwrap().approval_required);
        assert!(classify(1500.0, false).unwrap().approval_required);
        assert!(classify(2500.0, false).unwrap().approval_required);
    }

    #[test]
    fn new_record_under_threshold_is_auto_approved() {
        let decision = classify(100.0, true).unwrap();
        assert!(decision.auto_approve);
        assert_eq!(
            decision.note.as_deref(),
            Some("Auto-approved: Purchase is under $500 threshold.")
        );
    }

    #[test]
    fn update_under_threshold_is_not_auto_approved() {
        let decision = classify(100.0, false).unwrap();
        assert!(!decision.auto_approve);
        assert_eq!(decision.note, None);
    }

    #[test]
    fn new_record_over_threshold_is_not_auto_approved() {
        for cost in [500.0, 1500.0, 2000.0, 9999.0] {
            let decision = classify(cost, true).unwrap();
            assert!(!decision.auto_approve, "cost {cost}");
            assert_eq!(decision.note, None);
        }
    }

    #[test]
    fn invalid_costs_do_not_fall_into_a_bucket() {
        assert_eq!(classify(f64::NAN, true), Err(InvalidCost::NotANumber));
        assert_eq!(classify(-1.0, true), Err(InvalidCost::Negative(-1.0)));
        assert_eq!(approval_tier(f64::INFINITY), Err(InvalidCost::NotFinite));
    }

    #[test]
    fn standalone_query_matches_record_classification() {
        let assignment = approval_tier(1500.0).unwrap();
        assert_eq!(
            assignment,
            TierAssignment {
                tier: ApprovalTier::Supervisor,
                approval_required: true,
            }
        );
        assert_eq!(assignment, classify(1500.0, true).unwrap().assignment());
    }

    #[test]
    fn unset_cost_is_not_evaluated() {
        assert_eq!(evaluate(None, true), Ok(None));
        assert_eq!(evaluate(Some(f64::NAN), true), Err(InvalidCost::NotANumber));
        assert_eq!(
            evaluate(Some(2000.0), false).unwrap().map(|d| d.tier),
            Some(ApprovalTier::Dual)
        );
    }

    #[test]
    fn decide_on_validated_cost_matches_classify() {
        for amount in [0.0, 499.99, 500.0, 2000.0] {
            let cost = EstimatedCost::new(amount).unwrap();
            for is_new in [true, false] {
                assert_eq!(decide(cost, is_new), classify(amount, is_new).unwrap());
            }
        }
    }

    #[test]
    fn tiers_serialize_lowercase() {
        let json = serde_json::to_string(&approval_tier(750.0).unwrap()).unwrap();
        assert_eq!(json, r#"{"tier":"supervisor","approval_required":true}"#);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            #[test]
            fn below_supervisor_threshold_is_none(
                cost in 0.0f64..SUPERVISOR_THRESHOLD,
                is_new in any::<bool>(),
            ) {
                let decision = classify(cost, is_new).unwrap();
                prop_assert_eq!(decision.tier, ApprovalTier::None);
                prop_assert!(!decision.approval_required);
                prop_assert_eq!(decision.auto_approve, is_new);
            }

            #[test]
            fn supervisor_band(
                cost in SUPERVISOR_THRESHOLD..DUAL_THRESHOLD,
                is_new in any::<bool>(),
            ) {
                let decision = classify(cost, is_new).unwrap();
                prop_assert_eq!(decision.tier, ApprovalTier::Supervisor);
                prop_assert!(decision.approval_required);
                prop_assert!(!decision.auto_approve);
            }

            #[test]
            fn dual_band(cost in DUAL_THRESHOLD..1.0e12f64, is_new in any::<bool>()) {
                let decision = classify(cost, is_new).unwrap();
                prop_assert_eq!(decision.tier, ApprovalTier::Dual);
                prop_assert!(decision.approval_required);
                prop_assert!(!decision.auto_approve);
            }

            #[test]
            fn negative_costs_are_rejected(cost in -1.0e12f64..-f64::MIN_POSITIVE) {
                prop_assert_eq!(classify(cost, true), Err(InvalidCost::Negative(cost)));
            }

            /// Same inputs, same output, no hidden state.
            #[test]
            fn classification_is_idempotent(cost in 0.0f64..1.0e9, is_new in any::<bool>()) {
                let first = classify(cost, is_new).unwrap();
                let second = classify(cost, is_new).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}
