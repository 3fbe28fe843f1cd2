//! Book (catalog record) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
}

impl Book {
    /// Key used to collapse copies of the same catalog entry
    pub fn catalog_key(&self) -> (&str, &str, &str) {
        (self.isbn.as_str(), self.title.as_str(), self.author.as_str())
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
}

/// Deduplicated catalog listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub books: Vec<Book>,
    pub total_books: usize,
}
