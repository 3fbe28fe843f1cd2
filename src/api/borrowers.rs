//! Borrower endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Borrower, NewBorrower},
    AppState,
};

use super::{ApiResponse, JsonBody, PathParams};

/// Register a new borrower
#[utoipa::path(
    post,
    path = "/borrower",
    tag = "borrowers",
    request_body = NewBorrower,
    responses(
        (status = 200, description = "Borrower registered, wrapped in the response envelope"),
        (status = 400, description = "Name or email address blank", body = ErrorResponse)
    )
)]
pub async fn register_borrower(
    State(state): State<AppState>,
    JsonBody(borrower): JsonBody<NewBorrower>,
) -> AppResult<Json<ApiResponse<Borrower>>> {
    let registered = state.services.borrowers.register(borrower).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, registered)))
}

/// Get a borrower by ID
#[utoipa::path(
    get,
    path = "/borrower/{id}",
    tag = "borrowers",
    params(
        ("id" = i64, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Borrower details, wrapped in the response envelope"),
        (status = 400, description = "Borrower not found", body = ErrorResponse)
    )
)]
pub async fn get_borrower(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> AppResult<Json<ApiResponse<Borrower>>> {
    let borrower = state.services.borrowers.get_by_id(id).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK, borrower)))
}

/// Remove a borrower
#[utoipa::path(
    delete,
    path = "/borrower/{id}",
    tag = "borrowers",
    params(
        ("id" = i64, Path, description = "Borrower ID")
    ),
    responses(
        (status = 200, description = "Borrower removed"),
        (status = 400, description = "Borrower not found", body = ErrorResponse)
    )
)]
pub async fn remove_borrower(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = state.services.borrowers.remove(id).await?;
    Ok(Json(ApiResponse::message(
        StatusCode::OK,
        format!("Successfully deleted Borrower with id {}", removed),
    )))
}
