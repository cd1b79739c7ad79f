//! Books repository for database operations

use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{on_foreign_key_violation, on_unique_violation, AppError, AppResult},
    models::{book::Book, CreateBook, Keyset, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books, newest first, optionally filtered by title
    pub async fn list(&self, search: Option<&str>, page: Keyset) -> AppResult<Vec<Book>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, pagination_id, title, author, description, is_booked, booked_until,
                   created_at, updated_at
            FROM books
            WHERE TRUE
            "#,
        );

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            query
                .push(" AND title ILIKE '%' || ")
                .push_bind(search.to_string())
                .push(" || '%'");
        }

        if let Some(last_id) = page.last_id {
            query.push(" AND pagination_id < ").push_bind(last_id);
        }

        query.push(" ORDER BY pagination_id DESC");

        if let Some(limit) = page.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let books = query
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Insert a book and return its id
    pub async fn create(&self, book: &CreateBook) -> AppResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO books (title, author, description) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, "book already exists"))
    }

    /// Replace the descriptive fields of a book
    pub async fn update(&self, book: &UpdateBook) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, author = $2, description = $3, updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.id)
        .execute(&self.pool)
        .await
        .map_err(|e| on_unique_violation(e, "book with that name already exists"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("book not found".to_string()));
        }

        Ok(())
    }

    /// Delete a book that no booking references
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| on_foreign_key_violation(e, "book is being used"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("book not found".to_string()));
        }

        Ok(())
    }
}
