//! Test doubles for the workflow collaborators.

use std::cell::RefCell;
use std::collections::HashMap;

use kestrel_shared::{EmployeeId, RequestId, Role};

use crate::workflow::directory::{Directory, DirectoryError, ScopeHints};
use crate::workflow::store::{RequestStore, StoreError};
use crate::workflow::types::ApprovalRequest;

/// In-memory directory with insertion-ordered role lookups.
pub(crate) struct StubDirectory {
    roles: HashMap<EmployeeId, Role>,
    managers: HashMap<EmployeeId, EmployeeId>,
    order: Vec<EmployeeId>,
    failing: bool,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
            managers: HashMap::new(),
            order: Vec::new(),
            failing: false,
        }
    }

    /// A directory whose every call fails, for propagation tests.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub fn add_employee(&mut self, role: Role) -> EmployeeId {
        let id = EmployeeId::new();
        self.roles.insert(id, role);
        self.order.push(id);
        id
    }

    pub fn set_manager(&mut self, employee: EmployeeId, manager: EmployeeId) {
        self.managers.insert(employee, manager);
    }

    /// Simulates an org change: the employee leaves (or changes role).
    pub fn set_role(&mut self, employee: EmployeeId, role: Role) {
        self.roles.insert(employee, role);
    }

    fn check(&self) -> Result<(), DirectoryError> {
        if self.failing {
            Err(DirectoryError::Unavailable("stub outage".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Directory for StubDirectory {
    fn role_of(&self, employee: EmployeeId) -> Result<Role, DirectoryError> {
        self.check()?;
        self.roles
            .get(&employee)
            .copied()
            .ok_or(DirectoryError::UnknownEmployee(employee))
    }

    fn employees_with_role(
        &self,
        role: Role,
        _hints: &ScopeHints,
    ) -> Result<Vec<EmployeeId>, DirectoryError> {
        self.check()?;
        Ok(self
            .order
            .iter()
            .filter(|id| self.roles.get(id) == Some(&role))
            .copied()
            .collect())
    }

    fn manager_of(&self, employee: EmployeeId) -> Result<Option<EmployeeId>, DirectoryError> {
        self.check()?;
        Ok(self.managers.get(&employee).copied())
    }
}

/// In-memory versioned store with optimistic concurrency.
pub(crate) struct MemoryStore {
    inner: RefCell<HashMap<RequestId, (ApprovalRequest, u64)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(HashMap::new()),
        }
    }

    /// Seeds a request at version 1.
    pub fn put(&self, request: ApprovalRequest) {
        self.inner.borrow_mut().insert(request.id, (request, 1));
    }

    /// Advances the stored version without changing content, simulating a
    /// concurrent writer.
    pub fn bump_version(&self, id: RequestId) {
        if let Some((_, version)) = self.inner.borrow_mut().get_mut(&id) {
            *version += 1;
        }
    }
}

impl RequestStore for MemoryStore {
    fn load(&self, id: RequestId) -> Result<(ApprovalRequest, u64), StoreError> {
        self.inner
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn save(&self, request: &ApprovalRequest, expected_version: u64) -> Result<u64, StoreError> {
        let mut inner = self.inner.borrow_mut();
        let actual = inner.get(&request.id).map(|(_, version)| *version);
        match actual {
            Some(actual) if actual != expected_version => Err(StoreError::StaleState {
                expected: expected_version,
                actual,
            }),
            Some(actual) => {
                let next = actual + 1;
                inner.insert(request.id, (request.clone(), next));
                Ok(next)
            }
            None => Err(StoreError::NotFound(request.id)),
        }
    }
}
