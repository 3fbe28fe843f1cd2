//! In-process record store
//!
//! Backs both store traits with ordered maps behind a single lock. Ids are
//! handed out from per-kind counters and never reused, like a serial column.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, BorrowedSetChange, BorrowerStore};
use crate::{
    error::AppResult,
    models::{Book, Borrower, NewBook, NewBorrower},
};

#[derive(Default)]
struct Tables {
    books: BTreeMap<i64, Book>,
    borrowers: BTreeMap<i64, Borrower>,
    last_book_id: i64,
    last_borrower_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        tables.last_book_id += 1;
        let stored = Book {
            id: tables.last_book_id,
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
        };
        tables.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(tables
            .books
            .values()
            .filter(|b| b.isbn == isbn)
            .cloned()
            .collect())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.books.contains_key(&id))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.tables.write().await.books.remove(&id);
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.read().await.books.values().cloned().collect())
    }
}

#[async_trait]
impl BorrowerStore for MemoryStore {
    async fn create(&self, borrower: &NewBorrower) -> AppResult<Borrower> {
        let mut tables = self.tables.write().await;
        tables.last_borrower_id += 1;
        let stored = Borrower {
            id: tables.last_borrower_id,
            name: borrower.name.clone(),
            email_address: borrower.email_address.clone(),
            borrowed_book_ids: BTreeSet::new(),
        };
        tables.borrowers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Borrower>> {
        Ok(self.tables.read().await.borrowers.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.tables.read().await.borrowers.contains_key(&id))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.tables.write().await.borrowers.remove(&id);
        Ok(())
    }

    async fn add_borrowed_book(&self, borrower_id: i64, book_id: i64) -> AppResult<BorrowedSetChange> {
        let mut tables = self.tables.write().await;
        Ok(match tables.borrowers.get_mut(&borrower_id) {
            Some(b) => {
                if b.borrowed_book_ids.insert(book_id) {
                    BorrowedSetChange::Applied
                } else {
                    BorrowedSetChange::Unchanged
                }
            }
            None => BorrowedSetChange::MissingBorrower,
        })
    }

    async fn remove_borrowed_book(&self, borrower_id: i64, book_id: i64) -> AppResult<BorrowedSetChange> {
        let mut tables = self.tables.write().await;
        Ok(match tables.borrowers.get_mut(&borrower_id) {
            Some(b) => {
                if b.borrowed_book_ids.remove(&book_id) {
                    BorrowedSetChange::Applied
                } else {
                    BorrowedSetChange::Unchanged
                }
            }
            None => BorrowedSetChange::MissingBorrower,
        })
    }
}
