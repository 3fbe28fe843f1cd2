//! Data models for the lending server

pub mod book;
pub mod borrower;

// Re-export commonly used types
pub use book::{Book, BookResponse, NewBook};
pub use borrower::{Borrower, NewBorrower};
