//! Workflow domain types for the approval lifecycle.
//!
//! Every workflow-bearing business object (leave, loan, payment request,
//! ...) shares the same envelope and the same lifecycle; the type-specific
//! fields travel as an opaque payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use kestrel_shared::{EmployeeId, RequestId, Role};

/// Request status in the approval workflow.
///
/// The valid transitions are:
/// - New → Pending (first approval on a staged request)
/// - New | Pending → Approved (approval at the last level)
/// - New | Pending → Rejected (rejection at any level)
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Freshly submitted, staged ahead of the first decision.
    New,
    /// Awaiting a decision at some level of the chain.
    Pending,
    /// Approved at the last level (immutable).
    Approved,
    /// Rejected at some level (immutable).
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(Self::New),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further transitions are accepted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns true if the request can still be decided.
    ///
    /// `New` and `Pending` are equivalent entry states; which one a
    /// request starts in is a property of its type.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::New | Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The business request types that flow through the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    /// Leave request.
    Leave,
    /// Loan request.
    Loan,
    /// Allowance grant.
    Allowance,
    /// Deduction entry.
    Deduction,
    /// Transfer between departments or projects.
    Transfer,
    /// Payment request.
    Payment,
    /// Installment postponement.
    Postponement,
    /// Temporary labor request.
    Labor,
}

impl RequestType {
    /// Every request type, for exhaustive table tests.
    pub const ALL: [RequestType; 8] = [
        RequestType::Leave,
        RequestType::Loan,
        RequestType::Allowance,
        RequestType::Deduction,
        RequestType::Transfer,
        RequestType::Payment,
        RequestType::Postponement,
        RequestType::Labor,
    ];

    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Loan => "loan",
            Self::Allowance => "allowance",
            Self::Deduction => "deduction",
            Self::Transfer => "transfer",
            Self::Payment => "payment",
            Self::Postponement => "postponement",
            Self::Labor => "labor",
        }
    }

    /// Parses a request type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "leave" => Some(Self::Leave),
            "loan" => Some(Self::Loan),
            "allowance" => Some(Self::Allowance),
            "deduction" => Some(Self::Deduction),
            "transfer" => Some(Self::Transfer),
            "payment" => Some(Self::Payment),
            "postponement" => Some(Self::Postponement),
            "labor" => Some(Self::Labor),
            _ => None,
        }
    }

    /// The status a freshly submitted request of this type starts in.
    ///
    /// Payment and labor requests stage through `New`; the other types
    /// enter `Pending` at level 1 directly.
    #[must_use]
    pub fn entry_status(&self) -> RequestStatus {
        match self {
            Self::Payment | Self::Labor => RequestStatus::New,
            _ => RequestStatus::Pending,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who may act at an approval level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ApproverSelector {
    /// Exactly this employee.
    Person(EmployeeId),
    /// Any employee currently holding this role.
    RoleHolder(Role),
}

/// One level of an approval chain.
///
/// Level numbers are contiguous starting at 1, and the chain is fixed at
/// request-creation time. Which employee currently satisfies a
/// `RoleHolder` selector is resolved live, each time the level becomes
/// current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalLevel {
    /// 1-based position in the chain.
    pub number: u8,
    /// Human-readable level name (e.g. "Direct Manager").
    pub name: String,
    /// Who may act at this level.
    pub selector: ApproverSelector,
}

/// Submission context used to route a request through its chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitterContext {
    /// The submitting employee.
    pub employee: EmployeeId,
    /// The submitter's department, if relevant to routing.
    pub department: Option<String>,
    /// The project the request concerns, if any.
    pub project: Option<String>,
    /// The monetary amount the request carries, if any.
    pub amount: Option<Decimal>,
}

impl SubmitterContext {
    /// A context carrying only the submitting employee.
    #[must_use]
    pub fn bare(employee: EmployeeId) -> Self {
        Self {
            employee,
            department: None,
            project: None,
            amount: None,
        }
    }
}

/// An approver note, passed through to the audit trail unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditNote {
    /// The employee who wrote the note.
    pub actor: EmployeeId,
    /// When the note was recorded.
    pub at: DateTime<Utc>,
    /// The note text.
    pub note: String,
}

/// The generic envelope shared by every workflow-bearing business object.
///
/// The envelope is a snapshot: the state machine consumes one and returns
/// the next, never mutating in place. Persistence and versioning belong to
/// the request store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// The business request type.
    pub request_type: RequestType,
    /// The submitting employee. Immutable after creation.
    pub requested_by: EmployeeId,
    /// Submission timestamp.
    pub request_date: DateTime<Utc>,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// 1-based current chain level.
    pub current_level: u8,
    /// Name of the current level.
    pub current_level_name: String,
    /// The employee expected to act next, when one could be resolved.
    pub next_approver: Option<EmployeeId>,
    /// Set iff `status == Rejected`.
    pub rejection_reason: Option<String>,
    /// The approval chain, frozen at creation.
    pub chain: Vec<ApprovalLevel>,
    /// Routing context captured at submission; role-selector levels are
    /// re-resolved against it whenever they become current.
    pub context: SubmitterContext,
    /// Type-specific fields, opaque to the workflow core.
    pub payload: serde_json::Value,
    /// Approver notes in decision order.
    pub audit_trail: Vec<AuditNote>,
}

impl ApprovalRequest {
    /// Returns the chain level definition for a 1-based level number.
    #[must_use]
    pub fn level(&self, number: u8) -> Option<&ApprovalLevel> {
        self.chain.iter().find(|l| l.number == number)
    }

    /// Returns the definition of the current level.
    #[must_use]
    pub fn current(&self) -> Option<&ApprovalLevel> {
        self.level(self.current_level)
    }

    /// Returns the number of the last chain level.
    #[must_use]
    pub fn last_level(&self) -> u8 {
        self.chain.last().map_or(0, |l| l.number)
    }

    /// Returns true iff status is `Approved` or `Rejected`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns true when the request is stuck at a role-selector level
    /// with no eligible approver.
    ///
    /// A blocked request is still pending; it is never treated as
    /// approved.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.status.is_actionable()
            && self.next_approver.is_none()
            && matches!(
                self.current().map(|l| &l.selector),
                Some(ApproverSelector::RoleHolder(_))
            )
    }
}
