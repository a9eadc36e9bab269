//! Balance accounting and ledger result types.

use serde::{Deserialize, Serialize};

use super::employee::EmployeeSummary;
use super::id::EmployeeId;
use super::leave_request::{LeaveRequest, LeaveStatus};

/// Prefix of the advisory returned when an application exceeds the balance.
pub const INSUFFICIENT_BALANCE_WARNING: &str = "insufficient balance";

/// Sums the days of every approved request in `requests`.
///
/// Pending and rejected requests do not count.
pub fn approved_days<'a>(requests: impl IntoIterator<Item = &'a LeaveRequest>) -> i64 {
    requests
        .into_iter()
        .filter(|r| r.status == LeaveStatus::Approved)
        .map(LeaveRequest::days)
        .sum()
}

/// An employee's remaining allowance together with their leave history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee the balance belongs to.
    pub employee_id: EmployeeId,
    /// Paid-leave days granted per year.
    pub annual_allowance: u32,
    /// Days consumed by approved requests.
    pub used_days: i64,
    /// `annual_allowance - used_days`. Negative when approvals overran.
    pub balance: i64,
    /// Every request of the employee, in submission order.
    pub history: Vec<LeaveRequest>,
}

impl LeaveBalance {
    /// Computes the balance fresh from the employee's full history.
    pub fn compute(
        employee_id: EmployeeId,
        annual_allowance: u32,
        history: Vec<LeaveRequest>,
    ) -> Self {
        let used_days = approved_days(&history);
        Self {
            employee_id,
            annual_allowance,
            used_days,
            balance: i64::from(annual_allowance) - used_days,
            history,
        }
    }
}

/// Outcome of a successful leave application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// The newly recorded pending request.
    pub leave: LeaveRequest,
    /// Advisory message when the request exceeds the remaining balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// A leave request joined with the applying employee's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveWithEmployee {
    /// The leave request.
    #[serde(flatten)]
    pub leave: LeaveRequest,
    /// Who applied.
    pub employee: EmployeeSummary,
}
