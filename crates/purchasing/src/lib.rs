//! Purchasing domain module: approval tiers for procurement requests.
//!
//! Pure, deterministic domain logic (no IO, no HTTP, no storage). The
//! threshold table lives in [`tier`] and is the only copy; the
//! [`request`] aggregate and any direct caller go through it.

pub mod cost;
pub mod request;
pub mod tier;

pub use cost::{EstimatedCost, InvalidCost};
pub use request::{
    ApprovalTierAssigned, EstimateRevised, ProcurementRequest, ProcurementRequestCommand,
    ProcurementRequestEvent, ProcurementRequestId, RequestAutoApproved, RequestState,
    RequestSubmitted, ReviseEstimate, SubmitRequest,
};
pub use tier::{
    AUTO_APPROVAL_NOTE, ApprovalTier, DUAL_THRESHOLD, SUPERVISOR_THRESHOLD, TierAssignment,
    TierDecision, approval_tier, classify, evaluate,
};
