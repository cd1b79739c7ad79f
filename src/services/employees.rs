//! Employee management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CreateEmployee, Employee},
    repository::Repository,
    services::auth::hash_password,
};

#[derive(Clone)]
pub struct EmployeesService {
    repository: Repository,
}

impl EmployeesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.repository.employees.list().await
    }

    pub async fn create_employee(&self, employee: &CreateEmployee) -> AppResult<Uuid> {
        let hash = hash_password(&employee.password)?;
        let id = self
            .repository
            .employees
            .create(&employee.username, &hash)
            .await?;

        tracing::info!(employee_id = %id, username = %employee.username, "Employee created");
        Ok(id)
    }

    /// Create the bootstrap account, or reset its password if the username is taken
    pub async fn init_admin(&self, username: &str, password: &str) -> AppResult<Uuid> {
        let hash = hash_password(password)?;
        let id = self.repository.employees.upsert(username, &hash).await?;
        tracing::info!(employee_id = %id, username = %username, "Admin account initialized");
        Ok(id)
    }

    /// Delete another employee. Employees cannot delete themselves.
    pub async fn delete_employee(&self, current_employee: Uuid, id: Uuid) -> AppResult<()> {
        ensure_not_self(current_employee, id)?;
        self.repository.employees.delete(id).await?;
        tracing::info!(employee_id = %id, deleted_by = %current_employee, "Employee deleted");
        Ok(())
    }
}

fn ensure_not_self(current_employee: Uuid, id: Uuid) -> AppResult<()> {
    if current_employee == id {
        return Err(AppError::Authorization("cannot delete yourself".to_string()));
    }
    Ok(())
}
