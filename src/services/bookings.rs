//! Booking (checkout/return) service

use uuid::Uuid;

use crate::{
    config::BookingsConfig,
    error::{AppError, AppResult},
    models::{BookingDetails, BookingQuery, CreateBooking, Keyset},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    config: BookingsConfig,
}

impl BookingsService {
    pub fn new(repository: Repository, config: BookingsConfig) -> Self {
        Self { repository, config }
    }

    /// Check a book out on behalf of the given employee
    pub async fn create_booking(&self, employee_id: Uuid, booking: &CreateBooking) -> AppResult<Uuid> {
        let id = self
            .repository
            .bookings
            .create(employee_id, booking, self.config.duration_days)
            .await?;

        tracing::info!(booking_id = %id, book_id = %booking.book_id, %employee_id, "Book checked out");
        Ok(id)
    }

    /// Return the book of a booking
    pub async fn return_book(&self, booking_id: Uuid) -> AppResult<()> {
        self.repository.bookings.return_book(booking_id).await?;
        tracing::info!(%booking_id, "Book returned");
        Ok(())
    }

    /// List bookings; an empty page is reported as not found
    pub async fn list_bookings(&self, query: &BookingQuery) -> AppResult<Vec<BookingDetails>> {
        let page = Keyset::new(query.last_id, query.limit)?;
        let bookings = self.repository.bookings.list(page).await?;

        if bookings.is_empty() {
            return Err(AppError::NotFound("no bookings found".to_string()));
        }

        Ok(bookings)
    }
}
