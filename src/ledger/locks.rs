//! Per-employee mutual exclusion for ledger mutations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::EmployeeId;

/// Hands out one async lock per employee.
///
/// Holding the guard serializes check-then-write sequences for that
/// employee while other employees proceed in parallel.
#[derive(Debug, Default)]
pub(crate) struct EmployeeLocks {
    locks: Mutex<HashMap<EmployeeId, Arc<AsyncMutex<()>>>>,
}

impl EmployeeLocks {
    /// Waits for and returns the lock for `employee_id`.
    pub(crate) async fn lock(&self, employee_id: EmployeeId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(employee_id).or_default())
        };
        lock.lock_owned().await
    }
}
