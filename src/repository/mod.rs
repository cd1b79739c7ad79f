//! Repository layer for database operations

pub mod bookings;
pub mod books;
pub mod employees;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub bookings: bookings::BookingsRepository,
    pub employees: employees::EmployeesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            employees: employees::EmployeesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query to check connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
