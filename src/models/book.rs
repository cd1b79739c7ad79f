//! Book (catalog) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Book as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    /// Monotonic cursor used for keyset pagination
    pub pagination_id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub is_booked: bool,
    /// Set while the book is checked out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog query parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring match on the title
    pub search: Option<String>,
    /// Return books with a pagination id strictly below this value
    pub last_id: Option<i64>,
    /// Maximum number of books to return
    pub limit: Option<i64>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    pub id: Uuid,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
}
