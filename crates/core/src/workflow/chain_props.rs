//! Property-based tests for chain construction.

use proptest::prelude::*;

use kestrel_shared::Role;

use crate::workflow::chain::ChainResolver;
use crate::workflow::testing::StubDirectory;
use crate::workflow::types::{ApproverSelector, RequestType, SubmitterContext};

/// Strategy for generating request types.
fn arb_request_type() -> impl Strategy<Value = RequestType> {
    prop::sample::select(RequestType::ALL.to_vec())
}

/// A directory with a manager for the submitter and one holder of every
/// approver role.
fn full_org() -> (StubDirectory, SubmitterContext) {
    let mut directory = StubDirectory::new();
    let submitter = directory.add_employee(Role::Employee);
    let manager = directory.add_employee(Role::ProjectManager);
    directory.set_manager(submitter, manager);
    directory.add_employee(Role::HrManager);
    directory.add_employee(Role::FinanceManager);
    directory.add_employee(Role::RegionalProjectManager);
    (directory, SubmitterContext::bare(submitter))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Level numbers are contiguous starting at 1 for every request type.
    #[test]
    fn prop_levels_are_contiguous_from_one(request_type in arb_request_type()) {
        let (directory, ctx) = full_org();
        let chain = ChainResolver::build_chain(request_type, &ctx, &directory).unwrap();
        prop_assert!(!chain.is_empty());
        for (index, level) in chain.iter().enumerate() {
            prop_assert_eq!(usize::from(level.number), index + 1);
            prop_assert!(!level.name.is_empty());
        }
    }

    /// Chain shape is a static property of the type: two submissions from
    /// the same org context produce identical chains.
    #[test]
    fn prop_chain_is_stable_per_type(request_type in arb_request_type()) {
        let (directory, ctx) = full_org();
        let first = ChainResolver::build_chain(request_type, &ctx, &directory).unwrap();
        let second = ChainResolver::build_chain(request_type, &ctx, &directory).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Every chain resolves each level either to a person frozen at build
    /// time or to a role that the directory can be asked about later.
    #[test]
    fn prop_every_level_is_resolvable_in_a_full_org(request_type in arb_request_type()) {
        let (directory, ctx) = full_org();
        let chain = ChainResolver::build_chain(request_type, &ctx, &directory).unwrap();
        for level in &chain {
            let approver = ChainResolver::resolve_approver(level, &ctx, &directory).unwrap();
            match level.selector {
                ApproverSelector::Person(person) => prop_assert_eq!(approver, person),
                ApproverSelector::RoleHolder(role) => {
                    prop_assert_eq!(directory_role(&directory, approver), role);
                }
            }
        }
    }
}

fn directory_role(directory: &StubDirectory, employee: kestrel_shared::EmployeeId) -> Role {
    use crate::workflow::directory::Directory;
    directory.role_of(employee).unwrap()
}
