//! Property-based tests for the approval state machine.

use proptest::prelude::*;

use kestrel_shared::{EmployeeId, Role};

use crate::workflow::service::{ApprovalService, WorkflowEvent};
use crate::workflow::testing::StubDirectory;
use crate::workflow::types::{ApprovalRequest, RequestStatus, RequestType, SubmitterContext};

/// Strategy for generating request types.
fn arb_request_type() -> impl Strategy<Value = RequestType> {
    prop::sample::select(RequestType::ALL.to_vec())
}

/// Strategy for non-blank rejection reasons.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{0,30}".prop_map(|s| s.trim().to_string()).prop_filter(
        "reason must be non-blank",
        |s| !s.is_empty(),
    )
}

struct Org {
    directory: StubDirectory,
    submitter: EmployeeId,
    manager: EmployeeId,
}

fn full_org() -> Org {
    let mut directory = StubDirectory::new();
    let submitter = directory.add_employee(Role::Employee);
    let manager = directory.add_employee(Role::ProjectManager);
    directory.set_manager(submitter, manager);
    directory.add_employee(Role::HrManager);
    directory.add_employee(Role::FinanceManager);
    directory.add_employee(Role::RegionalProjectManager);
    Org {
        directory,
        submitter,
        manager,
    }
}

fn submit(org: &Org, request_type: RequestType) -> ApprovalRequest {
    ApprovalService::submit(
        request_type,
        serde_json::json!({}),
        SubmitterContext::bare(org.submitter),
        &org.directory,
    )
    .unwrap()
    .into_request()
}

/// Drives a pending request fully through its chain by always acting as
/// the routed next approver.
fn drive_to_terminal(org: &Org, mut request: ApprovalRequest) -> ApprovalRequest {
    while !request.is_terminal() {
        let actor = request.next_approver.expect("full org always routes");
        request = ApprovalService::approve(&request, actor, None, &org.directory)
            .unwrap()
            .into_request();
    }
    request
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// `approve` never decreases the current level, and driving any
    /// request to the end of its chain yields Approved.
    #[test]
    fn prop_approve_is_monotonic(request_type in arb_request_type()) {
        let org = full_org();
        let mut request = submit(&org, request_type);
        let mut last_level = request.current_level;

        while !request.is_terminal() {
            let actor = request.next_approver.unwrap();
            request = ApprovalService::approve(&request, actor, None, &org.directory)
                .unwrap()
                .into_request();
            prop_assert!(request.current_level >= last_level);
            last_level = request.current_level;
        }
        prop_assert_eq!(request.status, RequestStatus::Approved);
        prop_assert_eq!(request.next_approver, None);
    }

    /// `reject` is terminal from every level of every chain.
    #[test]
    fn prop_reject_is_terminal_at_any_level(
        request_type in arb_request_type(),
        decisions_before_reject in 0usize..3,
        reason in arb_reason(),
    ) {
        let org = full_org();
        let mut request = submit(&org, request_type);

        for _ in 0..decisions_before_reject {
            if request.current_level == request.last_level() {
                break;
            }
            let actor = request.next_approver.unwrap();
            request = ApprovalService::approve(&request, actor, None, &org.directory)
                .unwrap()
                .into_request();
        }

        let actor = request.next_approver.unwrap();
        let rejected = ApprovalService::reject(&request, actor, reason.clone(), &org.directory)
            .unwrap()
            .into_request();
        prop_assert_eq!(rejected.status, RequestStatus::Rejected);
        prop_assert_eq!(rejected.rejection_reason, Some(reason));
        prop_assert_eq!(rejected.next_approver, None);
    }

    /// Terminal requests refuse both operations, whoever asks.
    #[test]
    fn prop_terminal_requests_are_immutable(
        request_type in arb_request_type(),
        reason in arb_reason(),
    ) {
        let org = full_org();
        let request = submit(&org, request_type);
        let terminal = drive_to_terminal(&org, request);

        let err = ApprovalService::approve(&terminal, org.manager, None, &org.directory)
            .unwrap_err();
        prop_assert_eq!(err.error_code(), "INVALID_TRANSITION");
        let err = ApprovalService::reject(&terminal, org.manager, reason, &org.directory)
            .unwrap_err();
        prop_assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }

    /// A blank reason never rejects; a non-blank reason from the routed
    /// approver always does.
    #[test]
    fn prop_reason_validation(
        request_type in arb_request_type(),
        padding in "[ ]{0,5}",
        reason in arb_reason(),
    ) {
        let org = full_org();
        let request = submit(&org, request_type);
        let actor = request.next_approver.unwrap();

        let err = ApprovalService::reject(&request, actor, padding, &org.directory).unwrap_err();
        prop_assert_eq!(err.error_code(), "VALIDATION_FAILED");

        let event = ApprovalService::reject(&request, actor, reason, &org.directory).unwrap();
        let is_rejected = matches!(event, WorkflowEvent::Rejected { .. });
        prop_assert!(is_rejected);
    }

    /// Transitions never mutate the input snapshot.
    #[test]
    fn prop_inputs_are_never_mutated(request_type in arb_request_type()) {
        let org = full_org();
        let request = submit(&org, request_type);
        let before = serde_json::to_value(&request).unwrap();

        let actor = request.next_approver.unwrap();
        let _ = ApprovalService::approve(&request, actor, Some("ok".to_string()), &org.directory);
        let _ = ApprovalService::reject(&request, actor, "no".to_string(), &org.directory);

        prop_assert_eq!(serde_json::to_value(&request).unwrap(), before);
    }
}
