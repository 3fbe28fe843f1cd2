//! Borrowers repository for PostgreSQL
//!
//! The borrowed set lives in `borrowed_books`, keyed by
//! `(borrower_id, book_id)`, so adding or removing an id is a single
//! statement and two racing borrows cannot both succeed.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{BorrowedSetChange, BorrowerStore};
use crate::{
    error::AppResult,
    models::{
        borrower::BorrowerRow,
        Borrower, NewBorrower,
    },
};

#[derive(Clone)]
pub struct BorrowersRepository {
    pool: Pool<Postgres>,
}

impl BorrowersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn borrowed_book_ids(&self, borrower_id: i64) -> AppResult<BTreeSet<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT book_id FROM borrowed_books WHERE borrower_id = $1",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids.into_iter().collect())
    }
}

#[async_trait]
impl BorrowerStore for BorrowersRepository {
    async fn create(&self, borrower: &NewBorrower) -> AppResult<Borrower> {
        let row = sqlx::query_as::<_, BorrowerRow>(
            r#"
            INSERT INTO borrowers (name, email_address)
            VALUES ($1, $2)
            RETURNING id, name, email_address
            "#,
        )
        .bind(&borrower.name)
        .bind(&borrower.email_address)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.with_books(BTreeSet::new()))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Borrower>> {
        let row = sqlx::query_as::<_, BorrowerRow>(
            "SELECT id, name, email_address FROM borrowers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let ids = self.borrowed_book_ids(row.id).await?;
                Ok(Some(row.with_books(ids)))
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrowers WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        // borrowed_books rows go with the borrower (ON DELETE CASCADE)
        sqlx::query("DELETE FROM borrowers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_borrowed_book(&self, borrower_id: i64, book_id: i64) -> AppResult<BorrowedSetChange> {
        let result = sqlx::query(
            r#"
            INSERT INTO borrowed_books (borrower_id, book_id)
            VALUES ($1, $2)
            ON CONFLICT (borrower_id, book_id) DO NOTHING
            "#,
        )
        .bind(borrower_id)
        .bind(book_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 1 => Ok(BorrowedSetChange::Applied),
            Ok(_) => Ok(BorrowedSetChange::Unchanged),
            // borrowed_books.borrower_id references borrowers(id)
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Ok(BorrowedSetChange::MissingBorrower)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_borrowed_book(&self, borrower_id: i64, book_id: i64) -> AppResult<BorrowedSetChange> {
        let result = sqlx::query(
            "DELETE FROM borrowed_books WHERE borrower_id = $1 AND book_id = $2",
        )
        .bind(borrower_id)
        .bind(book_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            Ok(BorrowedSetChange::Applied)
        } else if self.exists(borrower_id).await? {
            Ok(BorrowedSetChange::Unchanged)
        } else {
            Ok(BorrowedSetChange::MissingBorrower)
        }
    }
}
