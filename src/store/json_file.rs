//! File-backed store backend.
//!
//! The whole record set is kept in memory and rewritten to a single JSON
//! file after every mutation. Writes go to `<file>.tmp` first and are then
//! renamed over the data file, so a crash mid-write never leaves a torn
//! file behind. A mutation becomes visible to readers only after it has
//! been persisted.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::state::StoreState;
use super::LeaveStore;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeId, LeaveId, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest,
};

/// Store that persists a JSON snapshot of all records.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading existing records if the file
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read or does not
    /// contain a valid snapshot.
    pub async fn open(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<StoreState>(&bytes).map_err(|e| {
                EngineError::storage(format!("corrupt data file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => return Err(io_error(&path, e)),
        };

        info!(
            path = %path.display(),
            employees = state.employees().len(),
            leaves = state.leaves().len(),
            "Opened JSON file store"
        );

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Returns the data file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the state, persists the copy and only
    /// then publishes it.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut StoreState) -> EngineResult<T> + Send,
    ) -> EngineResult<T> {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let out = change(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }

    async fn persist(&self, state: &StoreState) -> EngineResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| io_error(dir, e))?;
        }

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| EngineError::storage(format!("failed to encode snapshot: {}", e)))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = json.len(), "Persisted snapshot");
        Ok(())
    }
}

fn io_error(path: &Path, e: io::Error) -> EngineError {
    EngineError::storage(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl LeaveStore for JsonFileStore {
    async fn insert_employee(
        &self,
        employee: NewEmployee,
        annual_allowance: u32,
    ) -> EngineResult<Employee> {
        self.mutate(move |state| Ok(state.insert_employee(employee, annual_allowance)))
            .await
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
        self.mutate(move |state| state.insert_leave(leave)).await
    }

    async fn find_leave(&self, id: LeaveId) -> EngineResult<Option<LeaveRequest>> {
        Ok(self.state.read().await.leave(id).cloned())
    }

    async fn update_leave_status(
        &self,
        id: LeaveId,
        status: LeaveStatus,
    ) -> EngineResult<LeaveRequest> {
        self.mutate(move |state| state.set_leave_status(id, status))
            .await
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
