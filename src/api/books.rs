//! Book (catalog) and lending endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Book, BookResponse, NewBook},
    AppState,
};

use super::{ApiResponse, JsonBody, PathParams};

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Book created, wrapped in the response envelope"),
        (status = 400, description = "ISBN already used with another title or author", body = ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    JsonBody(book): JsonBody<NewBook>,
) -> AppResult<(StatusCode, Json<ApiResponse<Book>>)> {
    let created = state.services.catalog.add_book(book).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED, created)),
    ))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details, wrapped in the response envelope"),
        (status = 400, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let deleted = state.services.catalog.delete_book(id).await?;
    Ok(Json(ApiResponse::message(
        StatusCode::OK,
        format!("Successfully deleted Book with id {}", deleted),
    )))
}

/// List the catalog, one entry per ISBN/title/author
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    responses(
        (status = 200, description = "Deduplicated books and their count, wrapped in the response envelope", body = BookResponse)
    )
)]
pub async fn list_unique_books(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<BookResponse>>> {
    let listing = state.services.catalog.list_unique_books().await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, listing)))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/books/{book_id}/borrow/{borrower_id}",
    tag = "lending",
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        ("borrower_id" = i64, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Book borrowed"),
        (status = 400, description = "Book or borrower not found, or already borrowed", body = ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    PathParams((book_id, borrower_id)): PathParams<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    let message = state.services.lending.borrow_book(book_id, borrower_id).await?;
    Ok(Json(ApiResponse::message(StatusCode::OK, message)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/{book_id}/return/{borrower_id}",
    tag = "lending",
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        ("borrower_id" = i64, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Book returned"),
        (status = 400, description = "Borrower not found, or book not borrowed", body = ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    PathParams((book_id, borrower_id)): PathParams<(i64, i64)>,
) -> AppResult<Json<ApiResponse<()>>> {
    let message = state.services.lending.return_book(book_id, borrower_id).await?;
    Ok(Json(ApiResponse::message(StatusCode::OK, message)))
}
