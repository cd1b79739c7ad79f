//! Bookings repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{booking::BookingLock, BookingDetails, CreateBooking, Keyset},
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Check a book out to a customer.
    ///
    /// The book row is locked for the duration of the transaction so two
    /// concurrent bookings of the same book cannot both see `is_booked = FALSE`.
    pub async fn create(
        &self,
        employee_id: Uuid,
        booking: &CreateBooking,
        duration_days: i32,
    ) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await?;

        let is_booked: bool =
            sqlx::query_scalar("SELECT is_booked FROM books WHERE id = $1 FOR UPDATE")
                .bind(booking.book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("book not found".to_string()))?;

        if is_booked {
            return Err(AppError::AlreadyBooked("book is already booked".to_string()));
        }

        let booking_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO bookings (book_id, customer_name, customer_phone, booked_until, updated_by)
            VALUES ($1, $2, $3, NOW() + make_interval(days => $4), $5)
            RETURNING id
            "#,
        )
        .bind(booking.book_id)
        .bind(&booking.customer_name)
        .bind(&booking.customer_phone)
        .bind(duration_days)
        .bind(employee_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE books
            SET is_booked = TRUE, booked_until = b.booked_until, updated_at = NOW()
            FROM bookings b
            WHERE books.id = $1 AND b.id = $2
            "#,
        )
        .bind(booking.book_id)
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking_id)
    }

    /// Mark a booking as returned and release its book
    pub async fn return_book(&self, booking_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let lock = sqlx::query_as::<_, BookingLock>(
            r#"
            SELECT bo.book_id, bo.is_returned
            FROM bookings bo
            INNER JOIN books b ON bo.book_id = b.id
            WHERE bo.id = $1
            FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("booking not found".to_string()))?;

        if lock.is_returned {
            return Err(AppError::AlreadyReturned("book is already returned".to_string()));
        }

        sqlx::query(
            r#"
            UPDATE bookings
            SET is_returned = TRUE, returned_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE books
            SET is_booked = FALSE, booked_until = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(lock.book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// List bookings, newest first
    pub async fn list(&self, page: Keyset) -> AppResult<Vec<BookingDetails>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT bo.id, bo.pagination_id, b.id AS book_id, b.title AS book_title,
                   b.author AS book_author, bo.customer_name, bo.customer_phone,
                   bo.booked_until, bo.is_returned, bo.created_at, bo.updated_at,
                   e.username AS updated_by, bo.returned_at
            FROM bookings bo
            INNER JOIN books b ON bo.book_id = b.id
            INNER JOIN employees e ON bo.updated_by = e.id
            "#,
        );

        if let Some(last_id) = page.last_id {
            query.push(" WHERE bo.pagination_id < ").push_bind(last_id);
        }

        query.push(" ORDER BY bo.pagination_id DESC");

        if let Some(limit) = page.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let bookings = query
            .build_query_as::<BookingDetails>()
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }
}
