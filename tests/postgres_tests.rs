//! PostgreSQL store tests
//!
//! Need a reachable database in `DATABASE_URL`; migrations are applied on
//! connect. Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::postgres::PgPoolOptions;
use tokio_test::{assert_err, assert_ok};

use lending_server::{
    models::{NewBook, NewBorrower},
    repository::{BorrowedSetChange, Repository},
    services::{lending, Services},
    AppError,
};

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

/// ISBN no other run has used, so tests can share a database
fn fresh_isbn() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}-{}", std::process::id(), nanos)
}

fn new_book(isbn: &str) -> NewBook {
    NewBook {
        isbn: isbn.to_string(),
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
    }
}

fn new_borrower(name: &str) -> NewBorrower {
    NewBorrower {
        name: name.to_string(),
        email_address: "ada@example.org".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn test_borrowed_set_changes() {
    let repository = repository().await;
    let borrower = assert_ok!(repository.borrowers.create(&new_borrower("Ada")).await);
    let store = &repository.borrowers;

    use BorrowedSetChange::*;
    assert_eq!(assert_ok!(store.add_borrowed_book(borrower.id, 5).await), Applied);
    assert_eq!(assert_ok!(store.add_borrowed_book(borrower.id, 5).await), Unchanged);
    let stored = assert_ok!(store.get_by_id(borrower.id).await).expect("Borrower missing");
    assert_eq!(stored.borrowed_book_ids.into_iter().collect::<Vec<_>>(), vec![5]);

    assert_eq!(assert_ok!(store.remove_borrowed_book(borrower.id, 5).await), Applied);
    assert_eq!(assert_ok!(store.remove_borrowed_book(borrower.id, 5).await), Unchanged);

    // No borrower row: foreign key on insert, existence check on delete
    let missing = borrower.id + 1_000_000;
    assert_eq!(assert_ok!(store.add_borrowed_book(missing, 5).await), MissingBorrower);
    assert_eq!(assert_ok!(store.remove_borrowed_book(missing, 5).await), MissingBorrower);
}

#[tokio::test]
#[ignore]
async fn test_borrow_return_cycle() {
    let services = Services::new(repository().await);
    let book = assert_ok!(services.catalog.add_book(new_book(&fresh_isbn())).await);
    let borrower = assert_ok!(services.borrowers.register(new_borrower("Ada")).await);

    assert_eq!(
        assert_ok!(services.lending.borrow_book(book.id, borrower.id).await),
        lending::BORROWED
    );
    let err = assert_err!(services.lending.borrow_book(book.id, borrower.id).await);
    assert_eq!(err.to_string(), lending::ALREADY_BORROWED);

    assert_eq!(
        assert_ok!(services.lending.return_book(book.id, borrower.id).await),
        lending::RETURNED
    );
    let err = assert_err!(services.lending.return_book(book.id, borrower.id).await);
    assert_eq!(err.to_string(), lending::NOT_BORROWED);

    let err = assert_err!(services.lending.return_book(book.id, borrower.id + 1_000_000).await);
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
#[ignore]
async fn test_isbn_copies_oldest_first() {
    let repository = repository().await;
    let isbn = fresh_isbn();
    let first = assert_ok!(repository.books.create(&new_book(&isbn)).await);
    let second = assert_ok!(repository.books.create(&new_book(&isbn)).await);

    let found = assert_ok!(repository.books.find_by_isbn(&isbn).await);
    assert_eq!(found, vec![first.clone(), second]);

    // The listing keeps the first copy of each ISBN/title/author
    let listing = assert_ok!(Services::new(repository).catalog.list_unique_books().await);
    let entries: Vec<_> = listing.books.iter().filter(|b| b.isbn == isbn).collect();
    assert_eq!(entries, vec![&first]);
    assert_eq!(listing.total_books, listing.books.len());
}

#[tokio::test]
#[ignore]
async fn test_remove_borrower_drops_borrowed_set() {
    let repository = repository().await;
    let borrower = assert_ok!(repository.borrowers.create(&new_borrower("Grace")).await);
    assert_ok!(repository.borrowers.add_borrowed_book(borrower.id, 1).await);
    assert_ok!(repository.borrowers.add_borrowed_book(borrower.id, 2).await);

    assert_ok!(repository.borrowers.delete(borrower.id).await);
    assert!(!assert_ok!(repository.borrowers.exists(borrower.id).await));

    let pool = repository.pool.as_ref().expect("Postgres repository has a pool");
    let remaining: i64 = assert_ok!(
        sqlx::query_scalar("SELECT COUNT(*) FROM borrowed_books WHERE borrower_id = $1")
            .bind(borrower.id)
            .fetch_one(pool)
            .await
    );
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore]
async fn test_blank_borrower_fields_refused_by_schema() {
    let repository = repository().await;

    let err = assert_err!(repository.borrowers.create(&new_borrower("  ")).await);
    assert!(matches!(err, AppError::Database(_)));

    let err = assert_err!(
        repository
            .borrowers
            .create(&NewBorrower {
                name: "Ada".to_string(),
                email_address: String::new(),
            })
            .await
    );
    assert!(matches!(err, AppError::Database(_)));
}
