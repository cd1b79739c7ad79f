//! Employees repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{on_foreign_key_violation, on_unique_violation, AppError, AppResult},
    models::{employee::EmployeeCredentials, Employee},
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get id and password hash for a username
    pub async fn get_credentials(&self, username: &str) -> AppResult<Option<EmployeeCredentials>> {
        let credentials = sqlx::query_as::<_, EmployeeCredentials>(
            "SELECT id, password FROM employees WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }

    /// Check whether an employee still exists
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// List all employees
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, username, created_at, updated_at FROM employees ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Insert an employee with an already hashed password
    pub async fn create(&self, username: &str, password_hash: &str) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO employees (username, password) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, "username already exists"))
    }

    /// Insert an employee or replace the password of an existing one
    pub async fn upsert(&self, username: &str, password_hash: &str) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO employees (username, password) VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE SET password = EXCLUDED.password, updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Delete an employee that no booking references
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| on_foreign_key_violation(e, "employee is being used"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("employee not found".to_string()));
        }

        Ok(())
    }
}
