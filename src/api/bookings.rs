//! Booking (checkout/return) endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{BookingDetails, BookingQuery, CreateBooking, CreatedId, IdQuery},
    AppState,
};

use super::{CurrentEmployee, ValidatedJson};

/// Check a book out to a customer
#[utoipa::path(
    post,
    path = "/collections/dashboard/booking",
    tag = "bookings",
    security(("session_cookie" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = CreatedId),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is already booked", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    CurrentEmployee(employee_id): CurrentEmployee,
    ValidatedJson(booking): ValidatedJson<CreateBooking>,
) -> AppResult<(StatusCode, Json<CreatedId>)> {
    let id = state
        .services
        .bookings
        .create_booking(employee_id, &booking)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

/// Return the book of a booking
#[utoipa::path(
    post,
    path = "/collections/dashboard/return",
    tag = "bookings",
    security(("session_cookie" = [])),
    params(
        ("id" = String, Query, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Book returned"),
        (status = 400, description = "Missing or invalid id", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Query(params): Query<IdQuery>,
) -> AppResult<StatusCode> {
    let id = params.parse()?;
    state.services.bookings.return_book(id).await?;
    Ok(StatusCode::OK)
}

/// List bookings, newest first
#[utoipa::path(
    get,
    path = "/collections/dashboard/booking",
    tag = "bookings",
    security(("session_cookie" = [])),
    params(
        ("last_id" = Option<i64>, Query, description = "Pagination cursor"),
        ("limit" = Option<i64>, Query, description = "Maximum number of bookings")
    ),
    responses(
        (status = 200, description = "Bookings", body = Vec<BookingDetails>),
        (status = 404, description = "No bookings found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let bookings = state.services.bookings.list_bookings(&query).await?;
    Ok(Json(bookings))
}
