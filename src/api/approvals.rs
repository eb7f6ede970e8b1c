//! Account approval endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::user::{UpdateStatus, User},
};

use super::{DataResponse, MessageResponse};

/// Teacher admins awaiting approval
#[utoipa::path(
    get,
    path = "/approvals/teachers",
    tag = "approvals",
    responses(
        (status = 200, description = "Pending teacher admins", body = DataResponse<User>)
    )
)]
pub async fn pending_teachers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DataResponse<User>>> {
    let users = state.services.approvals.pending_teachers().await?;
    Ok(Json(DataResponse { data: users }))
}

/// Students of a department awaiting approval
#[utoipa::path(
    get,
    path = "/approvals/students/{department}",
    tag = "approvals",
    params(
        ("department" = String, Path, description = "Department name")
    ),
    responses(
        (status = 200, description = "Pending students", body = DataResponse<User>)
    )
)]
pub async fn pending_students(
    State(state): State<crate::AppState>,
    Path(department): Path<String>,
) -> AppResult<Json<DataResponse<User>>> {
    let users = state.services.approvals.pending_students(&department).await?;
    Ok(Json(DataResponse { data: users }))
}

/// Approve or reject a user.
///
/// On a real status change the user gets exactly one approval notification.
#[utoipa::path(
    put,
    path = "/approvals",
    tag = "approvals",
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    Json(payload): Json<UpdateStatus>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .approvals
        .update_status(payload.user_id, payload.status)
        .await?;

    Ok(Json(MessageResponse::new("Status updated successfully")))
}
