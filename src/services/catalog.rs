//! Catalog management service

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult, EntityKind},
    models::{Book, BookResponse, NewBook},
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

    /// Add a book, keeping every record of an ISBN on the same title and author.
    ///
    /// A matching ISBN does not prevent creation: each call stores a new
    /// record, one per physical copy.
    pub async fn add_book(&self, book: NewBook) -> AppResult<Book> {
        let existing = self.repository.books.find_by_isbn(&book.isbn).await?;

        if let Some(first) = existing.first() {
            if first.title != book.title || first.author != book.author {
                let message = format!(
                    "A book with ISBN {} must have the same title and author. \
                     Existing: {} by {}, Provided: {} by {}",
                    book.isbn, first.title, first.author, book.title, book.author
                );
                tracing::warn!(isbn = %book.isbn, "{}", message);
                return Err(AppError::Validation(message));
            }
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = created.id, isbn = %created.isbn, "Book added to catalog");
        Ok(created)
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))
    }

    /// Delete a book record
    pub async fn delete_book(&self, id: i64) -> AppResult<i64> {
        if !self.repository.books.exists(id).await? {
            tracing::warn!(book_id = id, "Delete requested for unknown book");
            return Err(AppError::book_not_found(id));
        }

        self.repository
            .books
            .delete(id)
            .await
            .map_err(|e| AppError::OperationFailure {
                kind: EntityKind::Book,
                id,
                source: Box::new(e),
            })?;

        tracing::info!(book_id = id, "Book deleted");
        Ok(id)
    }

    /// List the catalog with copies collapsed.
    ///
    /// The first record seen for each `(isbn, title, author)` is kept, in
    /// storage order.
    pub async fn list_unique_books(&self) -> AppResult<BookResponse> {
        let all = self.repository.books.list_all().await?;

        let mut unique = IndexMap::new();
        for book in &all {
            unique.entry(book.catalog_key()).or_insert(book);
        }

        let books: Vec<Book> = unique.into_values().cloned().collect();
        Ok(BookResponse {
            total_books: books.len(),
            books,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::repository::{memory::MemoryStore, MockBookStore};

    fn new_book(isbn: &str, title: &str, author: &str) -> NewBook {
        NewBook {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    fn service() -> CatalogService {
        CatalogService::new(Repository::in_memory())
    }

    #[tokio::test]
    async fn test_add_book_same_isbn_same_details_creates_copy() {
        let catalog = service();
        let first = assert_ok!(catalog.add_book(new_book("1234567890", "Test Book", "Author A")).await);
        let second = assert_ok!(catalog.add_book(new_book("1234567890", "Test Book", "Author A")).await);
        assert_ne!(first.id, second.id);
        assert_eq!(first.catalog_key(), second.catalog_key());
    }

    #[tokio::test]
    async fn test_add_book_isbn_mismatch_rejected() {
        let catalog = service();
        catalog
            .add_book(new_book("1234567890", "Test Book", "Author A"))
            .await
            .unwrap();

        let err = assert_err!(
            catalog
                .add_book(new_book("1234567890", "Different Title", "Different Author"))
                .await
        );
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("A book with ISBN 1234567890 must have the same title and author."));
                assert!(msg.contains("Existing: Test Book by Author A"));
                assert!(msg.contains("Provided: Different Title by Different Author"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_book_author_only_mismatch_rejected() {
        let catalog = service();
        catalog.add_book(new_book("555", "Emma", "Jane Austen")).await.unwrap();
        let result = catalog.add_book(new_book("555", "Emma", "J. Austen")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(catalog.list_unique_books().await.unwrap().total_books, 1);
    }

    #[tokio::test]
    async fn test_get_book_missing() {
        let err = service().get_book(42).await.unwrap_err();
        assert_eq!(err.to_string(), "Book with ID 42 not found.");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let catalog = service();
        let book = catalog.add_book(new_book("1", "A", "B")).await.unwrap();

        assert_eq!(catalog.delete_book(book.id).await.unwrap(), book.id);
        assert!(matches!(
            catalog.get_book(book.id).await,
            Err(AppError::NotFound { kind: EntityKind::Book, .. })
        ));
        assert!(matches!(
            catalog.delete_book(book.id).await,
            Err(AppError::NotFound { kind: EntityKind::Book, .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_storage_failure_is_operation_failure() {
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(true));
        books
            .expect_delete()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let repository = Repository::from_stores(Arc::new(books), Arc::new(MemoryStore::default()));
        let err = CatalogService::new(repository).delete_book(3).await.unwrap_err();

        match err {
            AppError::OperationFailure { kind, id, source } => {
                assert_eq!(kind, EntityKind::Book);
                assert_eq!(id, 3);
                assert!(matches!(*source, AppError::Database(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_unique_books_first_seen_wins() {
        let catalog = service();
        let a = catalog.add_book(new_book("1", "Dune", "Herbert")).await.unwrap();
        let b = catalog.add_book(new_book("2", "Emma", "Austen")).await.unwrap();
        catalog.add_book(new_book("1", "Dune", "Herbert")).await.unwrap();
        catalog.add_book(new_book("2", "Emma", "Austen")).await.unwrap();

        let listing = catalog.list_unique_books().await.unwrap();
        assert_eq!(listing.books, vec![a, b]);
        assert_eq!(listing.total_books, listing.books.len());
    }

    #[tokio::test]
    async fn test_list_unique_books_recomputed_after_delete() {
        let catalog = service();
        let a = catalog.add_book(new_book("1", "Dune", "Herbert")).await.unwrap();
        let copy = catalog.add_book(new_book("1", "Dune", "Herbert")).await.unwrap();

        catalog.delete_book(a.id).await.unwrap();
        let listing = catalog.list_unique_books().await.unwrap();
        assert_eq!(listing.books, vec![copy]);
        assert_eq!(listing.total_books, 1);
    }

    #[tokio::test]
    async fn test_list_unique_books_empty() {
        let listing = service().list_unique_books().await.unwrap();
        assert!(listing.books.is_empty());
        assert_eq!(listing.total_books, 0);
    }
}
