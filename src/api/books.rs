//! Book catalog and upload endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{BookDetails, UploadBook},
};

use super::DataResponse;

/// Search query parameters
#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Upload response
#[derive(Serialize, ToSchema)]
pub struct UploadBookResponse {
    /// Generated book ID
    pub id: i32,
    pub message: String,
}

/// Upload a book.
///
/// Runs the fulfillment workflow: persists the book, optionally closes the
/// referenced request, and broadcasts to the department.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = UploadBook,
    responses(
        (status = 201, description = "Book uploaded", body = UploadBookResponse),
        (status = 400, description = "Missing title or file_url"),
        (status = 500, description = "Persistence failure")
    )
)]
pub async fn upload_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<UploadBook>,
) -> AppResult<(StatusCode, Json<UploadBookResponse>)> {
    let id = state.services.library.upload_book(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadBookResponse {
            id,
            message: "Book uploaded successfully".to_string(),
        }),
    ))
}

/// Search books across title, author, department and subject
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(
        ("q" = Option<String>, Query, description = "Search term")
    ),
    responses(
        (status = 200, description = "Matching books", body = DataResponse<BookDetails>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<BookDetails>>> {
    let books = state
        .services
        .library
        .search(params.q.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(DataResponse { data: books }))
}

/// Ten most recently uploaded books
#[utoipa::path(
    get,
    path = "/books/recent",
    tag = "books",
    responses(
        (status = 200, description = "Recent books", body = DataResponse<BookDetails>)
    )
)]
pub async fn recent_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DataResponse<BookDetails>>> {
    let books = state.services.library.recent().await?;
    Ok(Json(DataResponse { data: books }))
}

/// All books of a department, ordered by subject
#[utoipa::path(
    get,
    path = "/books/department/{department}",
    tag = "books",
    params(
        ("department" = String, Path, description = "Department name")
    ),
    responses(
        (status = 200, description = "Department books", body = DataResponse<BookDetails>)
    )
)]
pub async fn books_by_department(
    State(state): State<crate::AppState>,
    Path(department): Path<String>,
) -> AppResult<Json<DataResponse<BookDetails>>> {
    let books = state.services.library.by_department(&department).await?;
    Ok(Json(DataResponse { data: books }))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetails>> {
    let book = state.services.library.get_book(id).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.library.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
