//! Process-local store backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::state::StoreState;
use super::LeaveStore;
use crate::error::EngineResult;
use crate::models::{
    Employee, EmployeeId, LeaveId, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest,
};

/// Keeps every record in memory behind a single read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaveStore for InMemoryStore {
    async fn insert_employee(
        &self,
        employee: NewEmployee,
        annual_allowance: u32,
    ) -> EngineResult<Employee> {
        Ok(self
            .state
            .write()
            .await
            .insert_employee(employee, annual_allowance))
    }

    async fn find_employee(&self, id: EmployeeId) -> EngineResult<Option<Employee>> {
        Ok(self.state.read().await.employee(id).cloned())
    }

    async fn find_employee_by_email(&self, email: &str) -> EngineResult<Option<Employee>> {
        Ok(self.state.read().await.employee_by_email(email).cloned())
    }

    async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.state.read().await.employees().to_vec())
    }

    async fn insert_leave(&self, leave: NewLeaveRequest) -> EngineResult<LeaveRequest> {
        self.state.write().await.insert_leave(leave)
    }

    async fn find_leave(&self, id: LeaveId) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.state.read().await.leave(id).cloned())
    }

    async fn update_leave_status(
        &self,
        id: LeaveId,
        status: LeaveStatus,
    ) -> EngineResult<LeaveRequest> {
        self.state.write().await.set_leave_status(id, status)
    }

    async fn list_leaves(&self) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self.state.read().await.leaves().to_vec())
    }

    async fn list_leaves_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self.state.read().await.leaves_for(employee_id))
    }
}
