//! Notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::notification::Notification};

use super::{DataResponse, MessageResponse};

/// Unread counter payload
#[derive(Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// All notifications of a user, newest first
#[utoipa::path(
    get,
    path = "/notifications/user/{id}",
    tag = "notifications",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's notifications", body = DataResponse<Notification>)
    )
)]
pub async fn notifications_for_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DataResponse<Notification>>> {
    let notifications = state.services.notifications.for_user(id).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// Number of unread notifications of a user
#[utoipa::path(
    get,
    path = "/notifications/user/{id}/unread-count",
    tag = "notifications",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse)
    )
)]
pub async fn unread_count(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state.services.notifications.unread_count(id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Mark one notification as read
#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    tag = "notifications",
    params(
        ("id" = i32, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = MessageResponse),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.notifications.mark_read(id).await?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// Mark all notifications of a user as read
#[utoipa::path(
    put,
    path = "/notifications/user/{id}/read-all",
    tag = "notifications",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "All notifications marked as read", body = MessageResponse)
    )
)]
pub async fn mark_all_read(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.notifications.mark_all_read(id).await?;
    Ok(Json(MessageResponse::new(
        "All notifications marked as read",
    )))
}
