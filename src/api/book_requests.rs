//! Book request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book_request::{BookRequestDetails, CreateBookRequest},
};

use super::DataResponse;

/// Submission response
#[derive(Serialize, ToSchema)]
pub struct SubmitRequestResponse {
    /// Generated request ID
    pub id: i32,
    pub message: String,
}

/// Submit a book request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Request submitted", body = SubmitRequestResponse),
        (status = 400, description = "Missing book name"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn submit_request(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<SubmitRequestResponse>)> {
    let id = state.services.book_requests.submit(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitRequestResponse {
            id,
            message: "Request submitted successfully".to_string(),
        }),
    ))
}

/// Requests submitted by one student
#[utoipa::path(
    get,
    path = "/requests/student/{id}",
    tag = "requests",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student's requests", body = DataResponse<BookRequestDetails>)
    )
)]
pub async fn requests_for_student(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DataResponse<BookRequestDetails>>> {
    let requests = state.services.book_requests.for_student(id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// Requests of one department, pending first
#[utoipa::path(
    get,
    path = "/requests/department/{department}",
    tag = "requests",
    params(
        ("department" = String, Path, description = "Department name")
    ),
    responses(
        (status = 200, description = "Department requests", body = DataResponse<BookRequestDetails>)
    )
)]
pub async fn requests_for_department(
    State(state): State<crate::AppState>,
    Path(department): Path<String>,
) -> AppResult<Json<DataResponse<BookRequestDetails>>> {
    let requests = state.services.book_requests.for_department(&department).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// All requests across departments (super admin view)
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    responses(
        (status = 200, description = "All requests", body = DataResponse<BookRequestDetails>)
    )
)]
pub async fn all_requests(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DataResponse<BookRequestDetails>>> {
    let requests = state.services.book_requests.all().await?;
    Ok(Json(DataResponse { data: requests }))
}
