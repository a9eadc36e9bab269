//! Employee registry.
//!
//! Owns employee records: registration with validation, lookup by id and
//! listing in creation order.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeId, NewEmployee};
use crate::store::LeaveStore;

/// Registers and resolves employees.
pub struct EmployeeRegistry {
    store: Arc<dyn LeaveStore>,
    policy: LeavePolicy,
    // email uniqueness is registry-wide, so registrations run one at a time
    create_lock: Mutex<()>,
}

impl EmployeeRegistry {
    /// Creates a registry over `store` applying `policy`.
    pub fn new(store: Arc<dyn LeaveStore>, policy: LeavePolicy) -> Self {
        Self {
            store,
            policy,
            create_lock: Mutex::new(()),
        }
    }

    /// Returns the policy this registry applies.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Registers a new employee with the policy's default allowance.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty, the email is
    /// malformed or already registered, or the joining date is earlier than
    /// the policy allows.
    pub async fn create_employee(&self, employee: NewEmployee) -> EngineResult<Employee> {
        let employee = self.validate(employee)?;

        let _guard = self.create_lock.lock().await;
        if self
            .store
            .find_employee_by_email(&employee.email)
            .await?
            .is_some()
        {
            warn!(email = %employee.email, "Rejected duplicate employee email");
            return Err(EngineError::validation("Email already exists"));
        }

        let employee = self
            .store
            .insert_employee(employee, self.policy.default_annual_allowance)
            .await?;
        info!(
            employee_id = %employee.id,
            department = %employee.department,
            annual_allowance = employee.annual_allowance,
            "Registered employee"
        );
        Ok(employee)
    }

    /// Resolves an employee by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no employee has this id.
    pub async fn get_employee(&self, id: EmployeeId) -> EngineResult<Employee> {
        self.store
            .find_employee(id)
            .await?
            .ok_or_else(|| EngineError::not_found("Employee", id))
    }

    /// Lists all employees in registration order.
    pub async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.store.list_employees().await
    }

    fn validate(&self, employee: NewEmployee) -> EngineResult<NewEmployee> {
        let name = required("name", &employee.name)?;
        let email = required("email", &employee.email)?;
        let department = required("department", &employee.department)?;

        if !is_valid_email(&email) {
            return Err(EngineError::validation(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        if employee.joining_date < self.policy.earliest_joining_date {
            return Err(EngineError::validation(format!(
                "Invalid joining date {}: must not be before {}",
                employee.joining_date, self.policy.earliest_joining_date
            )));
        }

        Ok(NewEmployee {
            name,
            email,
            department,
            joining_date: employee.joining_date,
        })
    }
}

fn required(field: &str, value: &str) -> EngineResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EngineError::validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value.to_string())
}

/// Minimal shape check: one `@`, a non-empty local part and a dotted domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
