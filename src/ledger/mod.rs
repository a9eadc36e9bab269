//! Leave ledger.
//!
//! Owns leave requests: validates new applications against the registry
//! and the employee's existing requests, applies approve/reject decisions
//! and computes balances on demand.
//!
//! # Balance policy
//!
//! Balances are never a hard gate. An application that exceeds the
//! remaining allowance is still recorded and carries an advisory warning;
//! an approval that overdraws the allowance is logged and applied.

mod locks;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    approved_days, EmployeeId, LeaveAction, LeaveApplication, LeaveBalance, LeaveId,
    LeavePeriod, LeaveRequest, LeaveWithEmployee, NewLeaveRequest, INSUFFICIENT_BALANCE_WARNING,
};
use crate::registry::EmployeeRegistry;
use crate::store::LeaveStore;

use locks::EmployeeLocks;

/// Records leave applications and decisions.
pub struct LeaveLedger {
    store: Arc<dyn LeaveStore>,
    registry: Arc<EmployeeRegistry>,
    policy: LeavePolicy,
    locks: EmployeeLocks,
}

impl LeaveLedger {
    /// Creates a ledger sharing `store` with `registry`.
    pub fn new(
        store: Arc<dyn LeaveStore>,
        registry: Arc<EmployeeRegistry>,
        policy: LeavePolicy,
    ) -> Self {
        Self {
            store,
            registry,
            policy,
            locks: EmployeeLocks::default(),
        }
    }

    /// Records a pending leave request for `employee_id` covering
    /// `start_date..=end_date`.
    ///
    /// When the request would take the employee past their allowance the
    /// request is still recorded and the result carries a warning starting
    /// with `"insufficient balance"`.
    ///
    /// # Errors
    ///
    /// - Not found if the employee does not exist.
    /// - Validation if the end precedes the start, or (under the default
    ///   policy) the leave starts before the employee joined.
    /// - Conflict if the dates overlap a pending or approved request of
    ///   the same employee.
    pub async fn apply_leave(
        &self,
        employee_id: EmployeeId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<LeaveApplication> {
        let employee = self.registry.get_employee(employee_id).await?;
        let period = LeavePeriod::new(start_date, end_date)?;
        if self.policy.reject_leave_before_joining && start_date < employee.joining_date {
            return Err(EngineError::validation(format!(
                "Cannot apply for leave before joining date {}",
                employee.joining_date
            )));
        }

        let _guard = self.locks.lock(employee_id).await;
        let existing = self.store.list_leaves_for_employee(employee_id).await?;

        if let Some(clash) = existing.iter().find(|leave| leave.blocks(&period)) {
            warn!(
                employee_id = %employee_id,
                conflicting_leave_id = %clash.id,
                start_date = %start_date,
                end_date = %end_date,
                "Rejected overlapping leave application"
            );
            return Err(EngineError::conflict(format!(
                "Overlapping leave request exists: request {} covers {} to {} ({})",
                clash.id, clash.start_date, clash.end_date, clash.status
            )));
        }

        let requested_days = period.days();
        let used_days = approved_days(&existing);
        let allowance = i64::from(employee.annual_allowance);
        let warning = (used_days + requested_days > allowance).then(|| {
            format!(
                "{}: requested {} days but only {} of {} remain",
                INSUFFICIENT_BALANCE_WARNING,
                requested_days,
                allowance - used_days,
                allowance
            )
        });

        let leave = self
            .store
            .insert_leave(NewLeaveRequest {
                employee_id,
                period,
                created_at: Utc::now(),
            })
            .await?;

        info!(
            leave_id = %leave.id,
            employee_id = %employee_id,
            requested_days,
            used_days,
            over_balance = warning.is_some(),
            "Recorded leave application"
        );
        Ok(LeaveApplication { leave, warning })
    }

    /// Approves or rejects a pending leave request.
    ///
    /// # Errors
    ///
    /// - Not found if no request has this id.
    /// - Conflict if the request has already been approved or rejected.
    pub async fn act_on_leave(
        &self,
        id: LeaveId,
        action: LeaveAction,
    ) -> EngineResult<LeaveRequest> {
        let employee_id = self.find_leave(id).await?.employee_id;

        let _guard = self.locks.lock(employee_id).await;
        // re-read under the lock, a concurrent decision may have landed
        let mut leave = self.find_leave(id).await?;
        leave.decide(action)?;

        if action == LeaveAction::Approve {
            self.log_overdraw(&leave).await?;
        }

        let leave = self.store.update_leave_status(id, leave.status).await?;
        info!(
            leave_id = %leave.id,
            employee_id = %leave.employee_id,
            status = %leave.status,
            "Decided leave request"
        );
        Ok(leave)
    }

    /// Lists every leave request with its employee's summary, in
    /// submission order.
    pub async fn list_leaves(&self) -> EngineResult<Vec<LeaveWithEmployee>> {
        // leaves first: employees are never removed, so every leave read
        // here has its employee in the later read
        let leaves = self.store.list_leaves().await?;
        let employees: HashMap<EmployeeId, _> = self
            .store
            .list_employees()
            .await?
            .into_iter()
            .map(|e| (e.id, e.summary()))
            .collect();

        leaves
            .into_iter()
            .map(|leave| {
                let employee = employees.get(&leave.employee_id).cloned().ok_or_else(|| {
                    EngineError::storage(format!(
                        "leave request {} references missing employee {}",
                        leave.id, leave.employee_id
                    ))
                })?;
                Ok(LeaveWithEmployee { leave, employee })
            })
            .collect()
    }

    /// Computes an employee's remaining allowance and returns their history.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the employee does not exist.
    pub async fn balance(&self, employee_id: EmployeeId) -> EngineResult<LeaveBalance> {
        let employee = self.registry.get_employee(employee_id).await?;
        let history = self.store.list_leaves_for_employee(employee_id).await?;
        let balance = LeaveBalance::compute(employee.id, employee.annual_allowance, history);
        debug!(
            employee_id = %employee_id,
            balance = balance.balance,
            "Computed leave balance"
        );
        Ok(balance)
    }

    async fn find_leave(&self, id: LeaveId) -> EngineResult<LeaveRequest> {
        self.store
            .find_leave(id)
            .await?
            .ok_or_else(|| EngineError::not_found("Leave request", id))
    }

    /// Approvals are not gated on balance; an overdraw is only logged.
    async fn log_overdraw(&self, leave: &LeaveRequest) -> EngineResult<()> {
        let employee = self.registry.get_employee(leave.employee_id).await?;
        let history = self.store.list_leaves_for_employee(leave.employee_id).await?;
        let used_days = approved_days(history.iter().filter(|l| l.id != leave.id));
        let remaining = i64::from(employee.annual_allowance) - used_days - leave.days();
        if remaining < 0 {
            warn!(
                leave_id = %leave.id,
                employee_id = %leave.employee_id,
                remaining,
                "Approval overdraws annual allowance"
            );
        }
        Ok(())
    }
}
