//! Repository layer: record store traits and their backends

pub mod books;
pub mod borrowers;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, Borrower, NewBook, NewBorrower},
};

/// Durable storage for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, book: &NewBook) -> AppResult<Book>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>>;
    /// Books sharing an ISBN, oldest first
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Vec<Book>>;
    async fn exists(&self, id: i64) -> AppResult<bool>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    /// Every book in storage order
    async fn list_all(&self) -> AppResult<Vec<Book>>;
}

/// Outcome of adding to or removing from a borrowed set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowedSetChange {
    /// The set was modified
    Applied,
    /// The id was already present (add) or absent (remove)
    Unchanged,
    /// No borrower with that id
    MissingBorrower,
}

/// Durable storage for borrowers and their borrowed set
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowerStore: Send + Sync {
    async fn create(&self, borrower: &NewBorrower) -> AppResult<Borrower>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Borrower>>;
    async fn exists(&self, id: i64) -> AppResult<bool>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn add_borrowed_book(&self, borrower_id: i64, book_id: i64) -> AppResult<BorrowedSetChange>;
    async fn remove_borrowed_book(&self, borrower_id: i64, book_id: i64) -> AppResult<BorrowedSetChange>;
}

/// Main repository struct holding the store backends
#[derive(Clone)]
pub struct Repository {
    pub pool: Option<Pool<Postgres>>,
    pub books: Arc<dyn BookStore>,
    pub borrowers: Arc<dyn BorrowerStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            borrowers: Arc::new(borrowers::BorrowersRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository kept entirely in process memory
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            pool: None,
            books: store.clone(),
            borrowers: store,
        }
    }

    /// Create a repository from arbitrary store implementations
    pub fn from_stores(books: Arc<dyn BookStore>, borrowers: Arc<dyn BorrowerStore>) -> Self {
        Self {
            pool: None,
            books,
            borrowers,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
