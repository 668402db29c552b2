//! Employee records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::holder::identity::{join_name, IdentityHolder};
use crate::types::{EmployeeId, HolderKind, WorkStatus};

/// A member of staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Registry-assigned identifier
    pub employee_id: EmployeeId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone_number: Option<String>,
    /// Department, e.g. "Management"
    pub department: String,
    /// Job title within the department
    pub position: String,
    /// Annual salary
    pub salary: f64,
    /// First day of employment
    pub hire_date: NaiveDate,
    /// Employment state
    pub work_status: WorkStatus,
}

/// Mutable details of an employee, used for both hiring and updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone_number: Option<String>,
    /// Department
    pub department: String,
    /// Position
    pub position: String,
    /// Annual salary
    pub salary: f64,
    /// First day of employment
    pub hire_date: NaiveDate,
    /// Employment state
    pub work_status: WorkStatus,
}

impl Employee {
    /// Create an employee record from its details
    pub fn new(employee_id: EmployeeId, details: EmployeeDetails) -> Self {
        Self {
            employee_id,
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            phone_number: details.phone_number,
            department: details.department,
            position: details.position,
            salary: details.salary,
            hire_date: details.hire_date,
            work_status: details.work_status,
        }
    }

    /// Replace every mutable field; the id is kept
    pub fn apply(&mut self, details: EmployeeDetails) {
        let id = self.employee_id;
        *self = Self::new(id, details);
    }

    /// Full name, first then last
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    /// Whole years between the hire date and `today`
    pub fn years_of_service(&self, today: NaiveDate) -> u32 {
        today.years_since(self.hire_date).unwrap_or(0)
    }
}

impl IdentityHolder for Employee {
    fn display_name(&self) -> String {
        self.full_name()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn phone(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    fn holder_kind(&self) -> HolderKind {
        HolderKind::Employee
    }
}
