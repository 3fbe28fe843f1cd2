//! Lending service: borrowing and returning books
//!
//! A loan is the presence of a book id in the borrower's borrowed set.
//! For each (book, borrower) pair the only transitions are
//! not borrowed -> borrowed on borrow and borrowed -> not borrowed on
//! return; anything else is a conflict and changes nothing.

use crate::{
    error::{AppError, AppResult},
    repository::{BorrowedSetChange, Repository},
};

pub const BORROWED: &str = "Book borrowed successfully.";
pub const RETURNED: &str = "Book returned successfully.";
pub const ALREADY_BORROWED: &str = "Book already borrowed by this member.";
pub const NOT_BORROWED: &str = "This book was not borrowed by the member.";

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check a book out to a borrower
    pub async fn borrow_book(&self, book_id: i64, borrower_id: i64) -> AppResult<&'static str> {
        self.repository
            .books
            .get_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::book_not_found(book_id))?;
        let borrower = self
            .repository
            .borrowers
            .get_by_id(borrower_id)
            .await?
            .ok_or_else(|| AppError::borrower_not_found(borrower_id))?;

        if borrower.borrowed_book_ids.contains(&book_id) {
            tracing::warn!(borrower_id, book_id, "{}", ALREADY_BORROWED);
            return Err(AppError::Conflict(ALREADY_BORROWED.to_string()));
        }

        // The store refuses a second insert of the same pair, which also
        // covers a concurrent borrow landing between the check and here.
        match self
            .repository
            .borrowers
            .add_borrowed_book(borrower_id, book_id)
            .await?
        {
            BorrowedSetChange::Applied => {}
            BorrowedSetChange::Unchanged => {
                tracing::warn!(borrower_id, book_id, "Lost race on borrow");
                return Err(AppError::Conflict(ALREADY_BORROWED.to_string()));
            }
            BorrowedSetChange::MissingBorrower => {
                return Err(AppError::borrower_not_found(borrower_id));
            }
        }

        tracing::info!(borrower_id, book_id, "Book borrowed");
        Ok(BORROWED)
    }

    /// Take a book back from a borrower.
    ///
    /// The book itself is not looked up, so a copy deleted from the catalog
    /// while on loan can still be returned.
    pub async fn return_book(&self, book_id: i64, borrower_id: i64) -> AppResult<&'static str> {
        match self
            .repository
            .borrowers
            .remove_borrowed_book(borrower_id, book_id)
            .await?
        {
            BorrowedSetChange::Applied => {}
            BorrowedSetChange::Unchanged => {
                tracing::warn!(borrower_id, book_id, "{}", NOT_BORROWED);
                return Err(AppError::Conflict(NOT_BORROWED.to_string()));
            }
            BorrowedSetChange::MissingBorrower => {
                return Err(AppError::borrower_not_found(borrower_id));
            }
        }

        tracing::info!(borrower_id, book_id, "Book returned");
        Ok(RETURNED)
    }
}
