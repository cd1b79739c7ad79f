//! Data models for the library server

pub mod book;
pub mod booking;
pub mod employee;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub use book::{Book, BookQuery, CreateBook, UpdateBook};
pub use booking::{BookingDetails, BookingQuery, CreateBooking};
pub use employee::{CreateEmployee, Employee, LoginRequest};

/// Identifier returned by create endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedId {
    pub id: Uuid,
}

/// `?id=` query parameter used by delete and return endpoints
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Parse the id, rejecting missing or malformed values
    pub fn parse(&self) -> AppResult<Uuid> {
        let raw = self
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("id is required".to_string()))?;

        Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("invalid id".to_string()))
    }
}

/// Keyset pagination window: rows strictly below `last_id`, at most `limit` of them.
///
/// Zero or absent values mean "from the top" and "unbounded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyset {
    pub last_id: Option<i64>,
    pub limit: Option<i64>,
}

impl Keyset {
    pub fn new(last_id: Option<i64>, limit: Option<i64>) -> AppResult<Self> {
        if last_id.is_some_and(|v| v < 0) {
            return Err(AppError::BadRequest("last_id must not be negative".to_string()));
        }
        if limit.is_some_and(|v| v < 0) {
            return Err(AppError::BadRequest("limit must not be negative".to_string()));
        }

        Ok(Self {
            last_id: last_id.filter(|v| *v > 0),
            limit: limit.filter(|v| *v > 0),
        })
    }
}
