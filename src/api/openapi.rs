//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrowers, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending API",
        version = "0.1.0",
        description = "Book catalog and borrower records REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::add_book,
        books::get_book,
        books::delete_book,
        books::list_unique_books,
        // Lending
        books::borrow_book,
        books::return_book,
        // Borrowers
        borrowers::register_borrower,
        borrowers::get_borrower,
        borrowers::remove_borrower,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::NewBook,
            crate::models::book::BookResponse,
            crate::models::borrower::Borrower,
            crate::models::borrower::NewBorrower,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "lending", description = "Borrowing and returning"),
        (name = "borrowers", description = "Borrower management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
