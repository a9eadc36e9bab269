//! Storage port for employees and leave requests.
//!
//! The registry and ledger talk to a [`LeaveStore`] trait object created
//! once at startup. Two backends are provided: [`InMemoryStore`] and
//! [`JsonFileStore`].

mod json_file;
mod memory;
mod state;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeId, LeaveId, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest,
};

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

/// Persistence operations needed by the registry and ledger.
///
/// Listings return records in creation order. Each mutation is applied
/// atomically: readers observe either the state before it or after it.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Persists a new employee and assigns its id.
    async fn insert_employee(
        &self,
        employee: NewEmployee,
        annual_allowance: u32,
    ) -> EngineResult<Employee>;

    /// Finds an employee by id.
    async fn find_employee(&self, id: EmployeeId) -> EngineResult<Option<Employee>>;

    /// Finds an employee by email, ignoring ASCII case.
    async fn find_employee_by_email(&self, email: &str) -> EngineResult<Option<Employee>>;

    /// Lists every employee.
    async fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Persists a new pending leave request and assigns its id.
    async fn insert_leave(&self, leave: NewLeaveRequest) -> EngineResult<LeaveRequest>;

    /// Finds a leave request by id.
    async fn find_leave(&self, id: LeaveId) -> EngineResult<Option<LeaveRequest>>;

    /// Overwrites the status of a leave request.
    async fn update_leave_status(
        &self,
        id: LeaveId,
        status: LeaveStatus,
    ) -> EngineResult<LeaveRequest>;

    /// Lists every leave request.
    async fn list_leaves(&self) -> EngineResult<Vec<LeaveRequest>>;

    /// Lists the leave requests of one employee.
    async fn list_leaves_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> EngineResult<Vec<LeaveRequest>>;
}

/// Opens the store selected by `config`.
pub async fn open_store(config: &StorageConfig) -> EngineResult<Arc<dyn LeaveStore>> {
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
        StorageBackend::JsonFile => {
            let path = config.path.as_ref().ok_or_else(|| {
                EngineError::storage("storage.path is required for the json_file backend")
            })?;
            Ok(Arc::new(JsonFileStore::open(path).await?))
        }
    }
}
