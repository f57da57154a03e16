//! The approval state machine.
//!
//! Every operation is a pure function from `(current snapshot, inputs)` to
//! a new snapshot wrapped in a [`WorkflowEvent`]; the input request is
//! never mutated in place. Persistence is the caller's job, except for the
//! `*_in_store` conveniences, which couple a transition to one
//! version-guarded store round-trip.

use chrono::Utc;

use kestrel_shared::{EmployeeId, RequestId};

use crate::workflow::chain::ChainResolver;
use crate::workflow::directory::Directory;
use crate::workflow::error::WorkflowError;
use crate::workflow::store::RequestStore;
use crate::workflow::types::{
    ApprovalRequest, AuditNote, RequestStatus, RequestType, SubmitterContext,
};

/// The result of a workflow transition, carrying the next snapshot.
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    /// A request was created and routed to its first level.
    Submitted {
        /// The new snapshot.
        request: ApprovalRequest,
    },
    /// An approval advanced the request to a later level.
    Advanced {
        /// The new snapshot.
        request: ApprovalRequest,
        /// The level the request now waits at.
        to_level: u8,
    },
    /// The final level approved; the request is terminal.
    Approved {
        /// The new snapshot.
        request: ApprovalRequest,
    },
    /// The request was rejected; terminal regardless of remaining levels.
    Rejected {
        /// The new snapshot.
        request: ApprovalRequest,
    },
    /// The request is pending at a role level with no eligible approver.
    Blocked {
        /// The new snapshot (still pending, `next_approver` unset).
        request: ApprovalRequest,
        /// The level that could not be routed.
        level: u8,
    },
}

impl WorkflowEvent {
    /// Returns the snapshot this event carries.
    #[must_use]
    pub fn request(&self) -> &ApprovalRequest {
        match self {
            Self::Submitted { request }
            | Self::Advanced { request, .. }
            | Self::Approved { request }
            | Self::Rejected { request }
            | Self::Blocked { request, .. } => request,
        }
    }

    /// Consumes the event, returning the snapshot.
    #[must_use]
    pub fn into_request(self) -> ApprovalRequest {
        match self {
            Self::Submitted { request }
            | Self::Advanced { request, .. }
            | Self::Approved { request }
            | Self::Rejected { request }
            | Self::Blocked { request, .. } => request,
        }
    }
}

/// Stateless service driving approval requests through their chains.
pub struct ApprovalService;

impl ApprovalService {
    /// Creates a request: builds its chain, enters the type's entry
    /// status at level 1, and routes it to the first approver.
    ///
    /// A level-1 role selector with zero holders yields
    /// [`WorkflowEvent::Blocked`]: the request exists and stays pending,
    /// it just has nobody to go to yet.
    pub fn submit<D: Directory>(
        request_type: RequestType,
        payload: serde_json::Value,
        ctx: SubmitterContext,
        directory: &D,
    ) -> Result<WorkflowEvent, WorkflowError> {
        let chain = ChainResolver::build_chain(request_type, &ctx, directory)?;
        let first = &chain[0];

        let next_approver = match ChainResolver::resolve_approver(first, &ctx, directory) {
            Ok(approver) => Some(approver),
            Err(WorkflowError::NoEligibleApprover { .. }) => None,
            Err(err) => return Err(err),
        };

        let request = ApprovalRequest {
            id: RequestId::new(),
            request_type,
            requested_by: ctx.employee,
            request_date: Utc::now(),
            status: request_type.entry_status(),
            current_level: first.number,
            current_level_name: first.name.clone(),
            next_approver,
            rejection_reason: None,
            chain: chain.clone(),
            context: ctx,
            payload,
            audit_trail: Vec::new(),
        };

        tracing::info!(
            request = %request.id,
            %request_type,
            routed = next_approver.is_some(),
            "request submitted"
        );

        if next_approver.is_none() {
            let level = first.number;
            return Ok(WorkflowEvent::Blocked { request, level });
        }
        Ok(WorkflowEvent::Submitted { request })
    }

    /// Approves the request at its current level.
    ///
    /// The actor must satisfy the level's selector. Mid-chain approvals
    /// advance the level and re-resolve the next approver; approval at
    /// the last level is terminal.
    pub fn approve<D: Directory>(
        request: &ApprovalRequest,
        actor: EmployeeId,
        notes: Option<String>,
        directory: &D,
    ) -> Result<WorkflowEvent, WorkflowError> {
        if !request.status.is_actionable() {
            return Err(WorkflowError::InvalidTransition {
                status: request.status,
            });
        }

        let level = Self::current_level(request)?;
        if !ChainResolver::actor_matches(&level, actor, directory)? {
            return Err(WorkflowError::Unauthorized {
                actor,
                level: level.number,
                level_name: level.name.clone(),
            });
        }

        let mut next = request.clone();
        if let Some(note) = notes {
            next.audit_trail.push(AuditNote {
                actor,
                at: Utc::now(),
                note,
            });
        }

        if level.number == request.last_level() {
            next.status = RequestStatus::Approved;
            next.next_approver = None;
            tracing::info!(request = %next.id, "request fully approved");
            return Ok(WorkflowEvent::Approved { request: next });
        }

        let to_level = level.number + 1;
        let upcoming = next
            .level(to_level)
            .cloned()
            .ok_or_else(|| Self::corrupt_chain(request, to_level))?;
        next.status = RequestStatus::Pending;
        next.current_level = to_level;
        next.current_level_name = upcoming.name.clone();

        match ChainResolver::resolve_approver(&upcoming, &next.context, directory) {
            Ok(approver) => {
                next.next_approver = Some(approver);
                tracing::info!(request = %next.id, to_level, "request advanced");
                Ok(WorkflowEvent::Advanced {
                    request: next,
                    to_level,
                })
            }
            Err(WorkflowError::NoEligibleApprover { .. }) => {
                next.next_approver = None;
                tracing::info!(request = %next.id, to_level, "request advanced but unroutable");
                Ok(WorkflowEvent::Blocked {
                    request: next,
                    level: to_level,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Rejects the request at its current level.
    ///
    /// The reason is mandatory and must not be blank; no placeholder is
    /// ever substituted. Rejection is terminal from any level.
    pub fn reject<D: Directory>(
        request: &ApprovalRequest,
        actor: EmployeeId,
        reason: String,
        directory: &D,
    ) -> Result<WorkflowEvent, WorkflowError> {
        if !request.status.is_actionable() {
            return Err(WorkflowError::InvalidTransition {
                status: request.status,
            });
        }

        if reason.trim().is_empty() {
            return Err(WorkflowError::ValidationFailed(
                "rejection reason is required".to_string(),
            ));
        }

        let level = Self::current_level(request)?;
        if !ChainResolver::actor_matches(&level, actor, directory)? {
            return Err(WorkflowError::Unauthorized {
                actor,
                level: level.number,
                level_name: level.name.clone(),
            });
        }

        let mut next = request.clone();
        next.audit_trail.push(AuditNote {
            actor,
            at: Utc::now(),
            note: reason.clone(),
        });
        next.status = RequestStatus::Rejected;
        next.rejection_reason = Some(reason);
        next.next_approver = None;

        tracing::info!(request = %next.id, level = level.number, "request rejected");
        Ok(WorkflowEvent::Rejected { request: next })
    }

    /// Returns true iff the request accepts no further transitions.
    #[must_use]
    pub fn is_terminal(request: &ApprovalRequest) -> bool {
        request.is_terminal()
    }

    /// Loads, approves, and saves in one version-guarded round-trip.
    ///
    /// A concurrent writer surfaces as [`WorkflowError::StaleState`]; the
    /// caller re-fetches and retries. The core itself never retries.
    pub fn approve_in_store<S: RequestStore, D: Directory>(
        store: &S,
        directory: &D,
        id: RequestId,
        actor: EmployeeId,
        notes: Option<String>,
    ) -> Result<WorkflowEvent, WorkflowError> {
        let (request, version) = store.load(id)?;
        let event = Self::approve(&request, actor, notes, directory)?;
        store.save(event.request(), version)?;
        Ok(event)
    }

    /// Loads, rejects, and saves in one version-guarded round-trip.
    pub fn reject_in_store<S: RequestStore, D: Directory>(
        store: &S,
        directory: &D,
        id: RequestId,
        actor: EmployeeId,
        reason: String,
    ) -> Result<WorkflowEvent, WorkflowError> {
        let (request, version) = store.load(id)?;
        let event = Self::reject(&request, actor, reason, directory)?;
        store.save(event.request(), version)?;
        Ok(event)
    }

    fn current_level(
        request: &ApprovalRequest,
    ) -> Result<crate::workflow::types::ApprovalLevel, WorkflowError> {
        request
            .current()
            .cloned()
            .ok_or_else(|| Self::corrupt_chain(request, request.current_level))
    }

    fn corrupt_chain(request: &ApprovalRequest, level: u8) -> WorkflowError {
        WorkflowError::ValidationFailed(format!(
            "request {} has no chain level {level}",
            request.id
        ))
    }
}
