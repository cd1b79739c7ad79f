//! Session enforcement for dashboard routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{error::AppError, AppState};

use super::{auth::ACCESS_COOKIE, CurrentEmployee};

/// Per-route-group settings for [`enforce_authentication`]
#[derive(Clone)]
pub struct SessionGuard {
    state: AppState,
    /// Maximum access token age accepted by this group, in seconds
    ttl_secs: u32,
    /// Attach [`CurrentEmployee`] to the request for handlers
    pass_employee_id: bool,
}

impl SessionGuard {
    pub fn new(state: AppState, ttl_secs: u32, pass_employee_id: bool) -> Self {
        Self {
            state,
            ttl_secs,
            pass_employee_id,
        }
    }
}

/// Reject requests without a valid, fresh `access` cookie
pub async fn enforce_authentication(
    State(guard): State<SessionGuard>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Authentication("missing session".to_string()))?;

    let employee_id = guard
        .state
        .services
        .session
        .validate(&token, guard.ttl_secs)
        .map_err(|e| {
            tracing::debug!(path = %request.uri().path(), "Rejected session: {}", e);
            e
        })?;

    if guard.pass_employee_id {
        request.extensions_mut().insert(CurrentEmployee(employee_id));
    }

    Ok(next.run(request).await)
}
