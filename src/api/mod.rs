//! API handlers for the library REST endpoints

pub mod auth;
pub mod bookings;
pub mod books;
pub mod employees;
pub mod health;
pub mod middleware;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, AppState};

use self::middleware::{enforce_authentication, SessionGuard};

/// Employee attached to the request by [`middleware::enforce_authentication`].
///
/// Extraction fails with 401 on routes the middleware does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEmployee(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentEmployee
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentEmployee>()
            .copied()
            .ok_or_else(|| AppError::Authentication("not authenticated".to_string()))
    }
}

/// JSON body that has passed its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let session = &state.config.session;

    let auth_dashboard = Router::new()
        .route(
            "/user",
            get(employees::list_employees)
                .post(employees::create_employee)
                .delete(employees::delete_employee),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            SessionGuard::new(state.clone(), session.auth_dashboard_ttl_secs, true),
            enforce_authentication,
        ));

    let collections_dashboard = Router::new()
        .route(
            "/book",
            post(books::create_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route(
            "/booking",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/return", post(bookings::return_book))
        .route_layer(axum::middleware::from_fn_with_state(
            SessionGuard::new(state.clone(), session.collections_dashboard_ttl_secs, true),
            enforce_authentication,
        ));

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .nest("/auth/dashboard", auth_dashboard)
        // Catalog (public)
        .route("/collections/book", get(books::list_books))
        .nest("/collections/dashboard", collections_dashboard)
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ping", get(health::ping))
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
