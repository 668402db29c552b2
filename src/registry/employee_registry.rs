//! In-memory registry of employees
//!
//! Same id discipline as the member registry: a per-instance counter starting at 1,
//! reset only by [`EmployeeRegistry::clear`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::holder::{Employee, EmployeeDetails};
use crate::registry::error::{RegistryError, RegistryResult};
use crate::types::EmployeeId;

/// Registry of employees keyed by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRegistry {
    employees: BTreeMap<EmployeeId, Employee>,
    next_employee_id: u32,
}

impl EmployeeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { employees: BTreeMap::new(), next_employee_id: 1 }
    }

    fn validate(details: &EmployeeDetails) -> RegistryResult<()> {
        if details.first_name.trim().is_empty() {
            return Err(RegistryError::invalid_argument("First name is required"));
        }
        if details.last_name.trim().is_empty() {
            return Err(RegistryError::invalid_argument("Last name is required"));
        }
        Ok(())
    }

    /// Hire an employee
    pub fn add_employee(&mut self, details: EmployeeDetails) -> RegistryResult<&Employee> {
        if let Err(e) = Self::validate(&details) {
            warn!(component = "registry", error = %e, "Rejected employee");
            return Err(e);
        }

        let employee_id = EmployeeId::new(self.next_employee_id);
        self.next_employee_id += 1;

        let employee = Employee::new(employee_id, details);
        info!(
            component = "registry",
            employee_id = employee_id.value(),
            name = employee.full_name().as_str(),
            department = employee.department.as_str(),
            "Employee added"
        );
        Ok(&*self.employees.entry(employee_id).or_insert(employee))
    }

    /// Look up an employee, failing if absent
    pub fn get_employee(&self, employee_id: EmployeeId) -> RegistryResult<&Employee> {
        self.employees.get(&employee_id).ok_or(RegistryError::EmployeeNotFound(employee_id))
    }

    /// Replace an employee's details
    pub fn update_employee(
        &mut self,
        employee_id: EmployeeId,
        details: EmployeeDetails,
    ) -> RegistryResult<&Employee> {
        Self::validate(&details)?;
        let employee = self
            .employees
            .get_mut(&employee_id)
            .ok_or(RegistryError::EmployeeNotFound(employee_id))?;
        employee.apply(details);
        info!(component = "registry", employee_id = employee_id.value(), "Employee updated");
        Ok(&*employee)
    }

    /// Remove an employee, returning the removed record
    pub fn delete_employee(&mut self, employee_id: EmployeeId) -> RegistryResult<Employee> {
        let removed = self
            .employees
            .remove(&employee_id)
            .ok_or(RegistryError::EmployeeNotFound(employee_id))?;
        info!(component = "registry", employee_id = employee_id.value(), "Employee removed");
        Ok(removed)
    }

    /// All employees in id order
    pub fn list_employees(&self) -> Vec<&Employee> {
        self.employees.values().collect()
    }

    /// Employees in `department`, ignoring case
    pub fn find_employees_by_department(&self, department: &str) -> Vec<&Employee> {
        self.employees
            .values()
            .filter(|e| e.department.eq_ignore_ascii_case(department))
            .collect()
    }

    /// Number of employees
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the registry holds no employees
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Remove every employee and restart ids at 1
    pub fn clear(&mut self) {
        let removed = self.employees.len();
        self.employees.clear();
        self.next_employee_id = 1;
        warn!(component = "registry", removed, "Employee registry cleared");
    }
}

impl Default for EmployeeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
