//! Book (inventory entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Circulation status of a book. Server-owned: the client may set it
/// optimistically after a borrow/return call but the next list reload is
/// authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Borrowed,
    Reserved,
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
            BookStatus::Reserved => "reserved",
        };
        write!(f, "{}", label)
    }
}

/// A book as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub status: BookStatus,
    pub copies: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create book request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewBookRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(range(min = 1, message = "At least one copy is required"))]
    pub copies: i32,
    /// Server defaults to `available` when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
}

/// Optional filters for listing books
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub category: Option<String>,
    pub status: Option<BookStatus>,
    pub search: Option<String>,
}

impl BookFilter {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = super::non_empty(&self.category) {
            params.push(("category", category));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(search) = super::non_empty(&self.search) {
            params.push(("search", search));
        }
        params
    }
}
