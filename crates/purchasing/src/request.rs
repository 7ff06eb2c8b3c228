use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tiergate_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult};
use tiergate_events::Event;

use crate::cost::EstimatedCost;
use crate::tier::{self, ApprovalTier, TierDecision};

/// Procurement request identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcurementRequestId(pub AggregateId);

impl ProcurementRequestId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProcurementRequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Procurement request lifecycle.
///
/// Routing between the non-approved states belongs to the external approval
/// workflow. This aggregate only ever moves a request to `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

/// Aggregate root: ProcurementRequest.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementRequest {
    id: ProcurementRequestId,
    estimated_cost: Option<EstimatedCost>,
    approval_tier: Option<ApprovalTier>,
    approval_required: bool,
    state: RequestState,
    work_notes: Vec<String>,
    version: u64,
    created: bool,
}

impl ProcurementRequest {
    /// Create an empty, not-yet-submitted aggregate instance for rehydration.
    pub fn empty(id: ProcurementRequestId) -> Self {
        Self {
            id,
            estimated_cost: None,
            approval_tier: None,
            approval_required: false,
            state: RequestState::Draft,
            work_notes: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ProcurementRequestId {
        self.id
    }

    pub fn estimated_cost(&self) -> Option<EstimatedCost> {
        self.estimated_cost
    }

    pub fn approval_tier(&self) -> Option<ApprovalTier> {
        self.approval_tier
    }

    pub fn approval_required(&self) -> bool {
        self.approval_required
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn work_notes(&self) -> &[String] {
        &self.work_notes
    }
}

impl AggregateRoot for ProcurementRequest {
    type Id = ProcurementRequestId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SubmitRequest (record creation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub request_id: ProcurementRequestId,
    pub estimated_cost: Option<f64>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReviseEstimate (record update carrying a cost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviseEstimate {
    pub request_id: ProcurementRequestId,
    pub estimated_cost: Option<f64>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProcurementRequestCommand {
    SubmitRequest(SubmitRequest),
    ReviseEstimate(ReviseEstimate),
}

/// Event: RequestSubmitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSubmitted {
    pub request_id: ProcurementRequestId,
    pub estimated_cost: Option<EstimatedCost>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: EstimateRevised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRevised {
    pub request_id: ProcurementRequestId,
    pub estimated_cost: Option<EstimatedCost>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ApprovalTierAssigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalTierAssigned {
    pub request_id: ProcurementRequestId,
    pub tier: ApprovalTier,
    pub approval_required: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RequestAutoApproved.
///
/// Carries the work note so the record layer can append it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestAutoApproved {
    pub request_id: ProcurementRequestId,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProcurementRequestEvent {
    RequestSubmitted(RequestSubmitted),
    EstimateRevised(EstimateRevised),
    ApprovalTierAssigned(ApprovalTierAssigned),
    RequestAutoApproved(RequestAutoApproved),
}

impl Event for ProcurementRequestEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProcurementRequestEvent::RequestSubmitted(_) => "purchasing.request.submitted",
            ProcurementRequestEvent::EstimateRevised(_) => "purchasing.request.estimate_revised",
            ProcurementRequestEvent::ApprovalTierAssigned(_) => "purchasing.request.tier_assigned",
            ProcurementRequestEvent::RequestAutoApproved(_) => "purchasing.request.auto_approved",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProcurementRequestEvent::RequestSubmitted(e) => e.occurred_at,
            ProcurementRequestEvent::EstimateRevised(e) => e.occurred_at,
            ProcurementRequestEvent::ApprovalTierAssigned(e) => e.occurred_at,
            ProcurementRequestEvent::RequestAutoApproved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ProcurementRequest {
    type Command = ProcurementRequestCommand;
    type Event = ProcurementRequestEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ProcurementRequestEvent::RequestSubmitted(e) => {
                self.id = e.request_id;
                self.estimated_cost = e.estimated_cost;
                self.approval_tier = None;
                self.approval_required = false;
                self.state = RequestState::Draft;
                self.work_notes.clear();
                self.created = true;
            }
            ProcurementRequestEvent::EstimateRevised(e) => {
                self.estimated_cost = e.estimated_cost;
            }
            ProcurementRequestEvent::ApprovalTierAssigned(e) => {
                self.approval_tier = Some(e.tier);
                self.approval_required = e.approval_required;
            }
            ProcurementRequestEvent::RequestAutoApproved(e) => {
                self.state = RequestState::Approved;
                self.work_notes.push(e.note.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProcurementRequestCommand::SubmitRequest(cmd) => self.handle_submit(cmd),
            ProcurementRequestCommand::ReviseEstimate(cmd) => self.handle_revise(cmd),
        }
    }
}

impl ProcurementRequest {
    fn ensure_request_id(&self, request_id: ProcurementRequestId) -> DomainResult<()> {
        if self.id != request_id {
            return Err(DomainError::invariant("request_id mismatch"));
        }
        Ok(())
    }

    fn handle_submit(&self, cmd: &SubmitRequest) -> DomainResult<Vec<ProcurementRequestEvent>> {
        if self.created {
            return Err(DomainError::conflict("procurement request already exists"));
        }
        self.ensure_request_id(cmd.request_id)?;

        // Validate before emitting anything: a bad cost aborts the whole write.
        let estimated_cost = cmd.estimated_cost.map(EstimatedCost::new).transpose()?;
        let decision = estimated_cost.map(|cost| tier::decide(cost, true));

        let mut events = vec![ProcurementRequestEvent::RequestSubmitted(RequestSubmitted {
            request_id: cmd.request_id,
            estimated_cost,
            occurred_at: cmd.occurred_at,
        })];
        if let Some(decision) = decision {
            self.push_decision(&mut events, cmd.request_id, decision, cmd.occurred_at);
        }
        Ok(events)
    }

    fn handle_revise(&self, cmd: &ReviseEstimate) -> DomainResult<Vec<ProcurementRequestEvent>> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_request_id(cmd.request_id)?;

        let estimated_cost = cmd.estimated_cost.map(EstimatedCost::new).transpose()?;
        let decision = estimated_cost.map(|cost| tier::decide(cost, false));

        let mut events = vec![ProcurementRequestEvent::EstimateRevised(EstimateRevised {
            request_id: cmd.request_id,
            estimated_cost,
            occurred_at: cmd.occurred_at,
        })];
        if let Some(decision) = decision {
            self.push_decision(&mut events, cmd.request_id, decision, cmd.occurred_at);
        }
        Ok(events)
    }

    fn push_decision(
        &self,
        events: &mut Vec<ProcurementRequestEvent>,
        request_id: ProcurementRequestId,
        decision: TierDecision,
        occurred_at: DateTime<Utc>,
    ) {
        events.push(ProcurementRequestEvent::ApprovalTierAssigned(
            ApprovalTierAssigned {
                request_id,
                tier: decision.tier,
                approval_required: decision.approval_required,
                occurred_at,
            },
        ));

        if let (true, Some(note)) = (decision.auto_approve, decision.note) {
            tracing::info!(%request_id, "auto-approving procurement request under threshold");
            events.push(ProcurementRequestEvent::RequestAutoApproved(
                RequestAutoApproved {
                    request_id,
                    note,
                    occurred_at,
                },
            ));
        }
    }
}
