//! The record set shared by every store backend.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeId, LeaveId, LeaveRequest, LeaveStatus, NewEmployee, NewLeaveRequest,
};

/// All employees and leave requests, in creation order.
///
/// Mutating methods either apply fully or return an error without
/// touching the state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoreState {
    employees: Vec<Employee>,
    leaves: Vec<LeaveRequest>,
    last_employee_id: u64,
    last_leave_id: u64,
}

impl StoreState {
    pub(crate) fn insert_employee(
        &mut self,
        employee: NewEmployee,
        annual_allowance: u32,
    ) -> Employee {
        self.last_employee_id += 1;
        let employee = Employee {
            id: EmployeeId::new(self.last_employee_id),
            name: employee.name,
            email: employee.email,
            department: employee.department,
            joining_date: employee.joining_date,
            annual_allowance,
        };
        self.employees.push(employee.clone());
        employee
    }

    pub(crate) fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Looks up an employee by email, ignoring ASCII case.
    pub(crate) fn employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email))
    }

    pub(crate) fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub(crate) fn insert_leave(&mut self, leave: NewLeaveRequest) -> EngineResult<LeaveRequest> {
        if self.employee(leave.employee_id).is_none() {
            return Err(EngineError::not_found("Employee", leave.employee_id));
        }
        self.last_leave_id += 1;
        let leave = LeaveRequest {
            id: LeaveId::new(self.last_leave_id),
            employee_id: leave.employee_id,
            start_date: leave.period.start(),
            end_date: leave.period.end(),
            status: LeaveStatus::Pending,
            created_at: leave.created_at,
        };
        self.leaves.push(leave.clone());
        Ok(leave)
    }

    pub(crate) fn leave(&self, id: LeaveId) -> Option<&LeaveRequest> {
        self.leaves.iter().find(|l| l.id == id)
    }

    pub(crate) fn leaves(&self) -> &[LeaveRequest] {
        &self.leaves
    }

    pub(crate) fn leaves_for(&self, employee_id: EmployeeId) -> Vec<LeaveRequest> {
        self.leaves
            .iter()
            .filter(|l| l.employee_id == employee_id)
            .cloned()
            .collect()
    }

    pub(crate) fn set_leave_status(
        &mut self,
        id: LeaveId,
        status: LeaveStatus,
    ) -> EngineResult<LeaveRequest> {
        let leave = self
            .leaves
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| EngineError::not_found("Leave request", id))?;
        leave.status = status;
        Ok(leave.clone())
    }
}
