//! Book catalog service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookQuery, CreateBook, Keyset, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books; an empty page is reported as not found
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let page = Keyset::new(query.last_id, query.limit)?;
        let books = self
            .repository
            .books
            .list(query.search.as_deref(), page)
            .await?;

        if books.is_empty() {
            return Err(AppError::NotFound("no books found".to_string()));
        }

        Ok(books)
    }

    pub async fn create_book(&self, book: &CreateBook) -> AppResult<Uuid> {
        let id = self.repository.books.create(book).await?;
        tracing::info!(book_id = %id, "Book created");
        Ok(id)
    }

    pub async fn update_book(&self, book: &UpdateBook) -> AppResult<()> {
        self.repository.books.update(book).await
    }

    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}
