//! Booking (checkout) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Booking joined with its book and the employee who recorded it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDetails {
    pub id: Uuid,
    pub pagination_id: i64,
    pub book_id: Uuid,
    pub book_title: String,
    pub book_author: String,
    pub customer_name: String,
    pub customer_phone: String,
    /// Due date of the checkout
    pub booked_until: DateTime<Utc>,
    pub is_returned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Username of the employee who recorded the booking
    pub updated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<DateTime<Utc>>,
}

/// Booking list query parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookingQuery {
    pub last_id: Option<i64>,
    pub limit: Option<i64>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub book_id: Uuid,
    #[validate(length(min = 1, message = "customer_name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "customer_phone is required"))]
    pub customer_phone: String,
}

/// State of a booking row while a return is in progress
#[derive(Debug, Clone, FromRow)]
pub struct BookingLock {
    pub book_id: Uuid,
    pub is_returned: bool,
}
