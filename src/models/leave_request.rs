//! Leave request model and its status state machine.
//!
//! A request starts `Pending` and moves exactly once, to `Approved` or
//! `Rejected`. Both decided states are terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{EmployeeId, LeaveId};
use super::period::LeavePeriod;
use crate::error::{EngineError, EngineResult};

/// Lifecycle status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted by an approver; counts against the allowance.
    Approved,
    /// Declined by an approver.
    Rejected,
}

impl LeaveStatus {
    /// Returns true for statuses that hold dates (Pending and Approved).
    pub fn blocks_dates(self) -> bool {
        matches!(self, LeaveStatus::Pending | LeaveStatus::Approved)
    }

    /// Returns true once a decision has been recorded.
    pub fn is_decided(self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// A decision an approver can take on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveAction {
    /// Accept the request.
    Approve,
    /// Decline the request.
    Reject,
}

impl LeaveAction {
    /// The status a pending request moves to under this action.
    pub fn target_status(self) -> LeaveStatus {
        match self {
            LeaveAction::Approve => LeaveStatus::Approved,
            LeaveAction::Reject => LeaveStatus::Rejected,
        }
    }
}

impl FromStr for LeaveAction {
    type Err = EngineError;

    /// Parses an action name case-insensitively. The past-tense status
    /// names (`Approved`, `Rejected`) are accepted as well.
    ///
    /// ```
    /// use leave_engine::models::LeaveAction;
    ///
    /// assert_eq!("Approve".parse::<LeaveAction>().unwrap(), LeaveAction::Approve);
    /// assert_eq!("rejected".parse::<LeaveAction>().unwrap(), LeaveAction::Reject);
    /// assert!("cancel".parse::<LeaveAction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" | "approved" => Ok(LeaveAction::Approve),
            "reject" | "rejected" => Ok(LeaveAction::Reject),
            other => Err(EngineError::validation(format!(
                "Unknown leave action '{}': expected Approve or Reject",
                other
            ))),
        }
    }
}

/// A leave request owned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: LeaveId,
    /// The employee who applied.
    pub employee_id: EmployeeId,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// The inclusive date range covered by this request.
    pub fn period(&self) -> LeavePeriod {
        // start <= end is checked before a request is ever stored
        LeavePeriod::ordered(self.start_date, self.end_date)
    }

    /// Number of calendar days requested.
    pub fn days(&self) -> i64 {
        self.period().days()
    }

    /// Returns true if this request holds dates that overlap `period`.
    pub fn blocks(&self, period: &LeavePeriod) -> bool {
        self.status.blocks_dates() && self.period().overlaps(period)
    }

    /// Applies `action`, moving the request out of `Pending`.
    ///
    /// Fails with a conflict if the request has already been decided.
    pub fn decide(&mut self, action: LeaveAction) -> EngineResult<()> {
        if self.status.is_decided() {
            return Err(EngineError::conflict(format!(
                "Leave request {} has already been decided ({})",
                self.id, self.status
            )));
        }
        self.status = action.target_status();
        Ok(())
    }
}

/// Input for recording a new leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveRequest {
    /// The employee applying.
    pub employee_id: EmployeeId,
    /// The requested dates.
    pub period: LeavePeriod,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}
