//! Approval chain construction and next-approver resolution.
//!
//! Each request type carries a fixed template of approval levels. Building
//! a chain pins the template to the submitter: "direct manager" levels
//! freeze to a specific person, role levels stay role selectors and are
//! resolved to a concrete employee only when the level becomes current, so
//! org changes between submission and decision are honored.

use kestrel_shared::{EmployeeId, Role};

use crate::workflow::directory::{Directory, ScopeHints};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ApprovalLevel, ApproverSelector, RequestType, SubmitterContext};

/// One slot in a request type's chain template.
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// The submitter's direct manager, frozen at chain build.
    DirectManager,
    /// Any current holder of the role, resolved live.
    Holder(Role),
}

impl Slot {
    const fn name(self) -> &'static str {
        match self {
            Self::DirectManager => "Direct Manager",
            Self::Holder(Role::HrManager) => "HR Manager",
            Self::Holder(Role::FinanceManager) => "Finance Manager",
            Self::Holder(Role::RegionalProjectManager) => "Regional Project Manager",
            Self::Holder(Role::GeneralManager) => "General Manager",
            Self::Holder(_) => "Approver",
        }
    }
}

/// The fixed level template for a request type.
///
/// Level count and selector kinds are a static property of the type; only
/// the identities occupying the slots vary per instance.
const fn template(request_type: RequestType) -> &'static [Slot] {
    match request_type {
        RequestType::Leave | RequestType::Transfer => {
            &[Slot::DirectManager, Slot::Holder(Role::HrManager)]
        }
        RequestType::Loan => &[
            Slot::DirectManager,
            Slot::Holder(Role::HrManager),
            Slot::Holder(Role::FinanceManager),
        ],
        RequestType::Allowance | RequestType::Deduction => &[
            Slot::Holder(Role::HrManager),
            Slot::Holder(Role::FinanceManager),
        ],
        RequestType::Payment | RequestType::Postponement => {
            &[Slot::DirectManager, Slot::Holder(Role::FinanceManager)]
        }
        RequestType::Labor => &[
            Slot::Holder(Role::RegionalProjectManager),
            Slot::Holder(Role::HrManager),
        ],
    }
}

/// Stateless resolver for approval chains and next approvers.
pub struct ChainResolver;

impl ChainResolver {
    /// Builds the approval chain for a request.
    ///
    /// Level numbers are contiguous starting at 1. Direct-manager slots
    /// freeze to the submitter's current manager; a submitter without one
    /// cannot have a chain built at all.
    pub fn build_chain<D: Directory>(
        request_type: RequestType,
        ctx: &SubmitterContext,
        directory: &D,
    ) -> Result<Vec<ApprovalLevel>, WorkflowError> {
        let mut chain = Vec::new();
        for (index, slot) in template(request_type).iter().enumerate() {
            let number = u8::try_from(index + 1)
                .map_err(|_| WorkflowError::ValidationFailed("chain too long".to_string()))?;
            let selector = match slot {
                Slot::DirectManager => {
                    let manager = directory.manager_of(ctx.employee)?.ok_or_else(|| {
                        WorkflowError::ValidationFailed(format!(
                            "employee {} has no direct manager on record",
                            ctx.employee
                        ))
                    })?;
                    ApproverSelector::Person(manager)
                }
                Slot::Holder(role) => ApproverSelector::RoleHolder(*role),
            };
            chain.push(ApprovalLevel {
                number,
                name: slot.name().to_string(),
                selector,
            });
        }
        Ok(chain)
    }

    /// Resolves the concrete employee expected to act at a level.
    ///
    /// Person selectors resolve to themselves. Role selectors ask the
    /// directory for current holders, narrowed by the submitter context;
    /// the first holder (stable directory order) becomes the routing
    /// hint. Zero holders is a distinguishable blocked condition, never an
    /// approval.
    pub fn resolve_approver<D: Directory>(
        level: &ApprovalLevel,
        ctx: &SubmitterContext,
        directory: &D,
    ) -> Result<EmployeeId, WorkflowError> {
        match &level.selector {
            ApproverSelector::Person(employee) => Ok(*employee),
            ApproverSelector::RoleHolder(role) => {
                let hints = ScopeHints::from(ctx);
                let holders = directory.employees_with_role(*role, &hints)?;
                holders.first().copied().ok_or_else(|| {
                    tracing::debug!(level = level.number, %role, "no eligible approver");
                    WorkflowError::NoEligibleApprover {
                        level: level.number,
                        role: *role,
                    }
                })
            }
        }
    }

    /// Returns whether an actor satisfies a level's selector.
    ///
    /// Person selectors demand an exact match; role selectors accept any
    /// current holder of the role, not just the routed hint. An actor the
    /// directory does not know simply does not match; only directory
    /// outages propagate as errors.
    pub fn actor_matches<D: Directory>(
        level: &ApprovalLevel,
        actor: EmployeeId,
        directory: &D,
    ) -> Result<bool, WorkflowError> {
        match &level.selector {
            ApproverSelector::Person(employee) => Ok(*employee == actor),
            ApproverSelector::RoleHolder(role) => match directory.role_of(actor) {
                Ok(actual) => Ok(actual == *role),
                Err(crate::workflow::directory::DirectoryError::UnknownEmployee(_)) => Ok(false),
                Err(err) => Err(err.into()),
            },
        }
    }
}
