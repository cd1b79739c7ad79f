//! Employee management endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{CreateEmployee, CreatedId, Employee, IdQuery},
    AppState,
};

use super::{CurrentEmployee, ValidatedJson};

/// List employees
#[utoipa::path(
    get,
    path = "/auth/dashboard/user",
    tag = "employees",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Employees", body = Vec<Employee>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_employees(State(state): State<AppState>) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.employees.list_employees().await?;
    Ok(Json(employees))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/auth/dashboard/user",
    tag = "employees",
    security(("session_cookie" = [])),
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = CreatedId),
        (status = 409, description = "Username already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(employee): ValidatedJson<CreateEmployee>,
) -> AppResult<(StatusCode, Json<CreatedId>)> {
    let id = state.services.employees.create_employee(&employee).await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/auth/dashboard/user",
    tag = "employees",
    security(("session_cookie" = [])),
    params(
        ("id" = String, Query, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 400, description = "Missing or invalid id", body = crate::error::ErrorResponse),
        (status = 403, description = "Cannot delete yourself", body = crate::error::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Employee has recorded bookings", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    CurrentEmployee(current): CurrentEmployee,
    Query(params): Query<IdQuery>,
) -> AppResult<StatusCode> {
    let id = params.parse()?;
    state.services.employees.delete_employee(current, id).await?;
    Ok(StatusCode::OK)
}
