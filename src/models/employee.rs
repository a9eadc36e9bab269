//! Employee model and related types.
//!
//! This module defines the Employee record owned by the registry, the
//! validated input used to create one, and the compact summary embedded in
//! leave listings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::EmployeeId;

/// Represents a registered employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The employee's full name.
    pub name: String,
    /// Contact email, unique across the registry.
    pub email: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The date the employee started employment.
    pub joining_date: NaiveDate,
    /// Paid-leave days granted per year.
    pub annual_allowance: u32,
}

impl Employee {
    /// Returns the name and department view used when listing leaves.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::{Employee, EmployeeId};
    /// use chrono::NaiveDate;
    ///
    /// let ada = Employee {
    ///     id: EmployeeId::new(1),
    ///     name: "Ada".to_string(),
    ///     email: "ada@example.com".to_string(),
    ///     department: "Engineering".to_string(),
    ///     joining_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     annual_allowance: 20,
    /// };
    /// assert_eq!(ada.summary().department, "Engineering");
    /// ```
    pub fn summary(&self) -> EmployeeSummary {
        EmployeeSummary {
            id: self.id,
            name: self.name.clone(),
            department: self.department.clone(),
        }
    }
}

/// Input for registering a new employee.
///
/// Fields are validated by the registry, not on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// The employee's full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The date the employee started employment.
    pub joining_date: NaiveDate,
}

/// Compact employee information embedded in leave listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Unique identifier for the employee.
    pub id: EmployeeId,
    /// The employee's full name.
    pub name: String,
    /// The department the employee belongs to.
    pub department: String,
}
