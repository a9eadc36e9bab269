//! Domain models for the Leave Engine.
//!
//! This module contains the core data structures for employees, leave
//! requests and balances.

mod balance;
mod employee;
mod id;
mod leave_request;
mod period;

pub use balance::{
    approved_days, LeaveApplication, LeaveBalance, LeaveWithEmployee,
    INSUFFICIENT_BALANCE_WARNING,
};
pub use employee::{Employee, EmployeeSummary, NewEmployee};
pub use id::{EmployeeId, LeaveId};
pub use leave_request::{LeaveAction, LeaveRequest, LeaveStatus, NewLeaveRequest};
pub use period::{parse_date, LeavePeriod};
