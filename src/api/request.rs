//! Request types for the Leave Engine API.
//!
//! Dates arrive as strings and are parsed here so that an unparsable date
//! surfaces as a validation error naming the offending field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{parse_date, EmployeeId, NewEmployee};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// The employee's full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// The department the employee belongs to.
    pub department: String,
    /// Joining date, `YYYY-MM-DD`.
    pub joining_date: String,
}

impl TryFrom<CreateEmployeeRequest> for NewEmployee {
    type Error = crate::error::EngineError;

    fn try_from(req: CreateEmployeeRequest) -> EngineResult<Self> {
        Ok(NewEmployee {
            joining_date: parse_date("joining_date", &req.joining_date)?,
            name: req.name,
            email: req.email,
            department: req.department,
        })
    }
}

/// Request body for `POST /leaves/apply`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyLeaveRequest {
    /// The employee applying.
    pub employee_id: EmployeeId,
    /// First day of leave, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day of leave, `YYYY-MM-DD`.
    pub end_date: String,
}

impl ApplyLeaveRequest {
    /// Parses the start and end dates.
    pub fn dates(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        Ok((
            parse_date("start_date", &self.start_date)?,
            parse_date("end_date", &self.end_date)?,
        ))
    }
}
