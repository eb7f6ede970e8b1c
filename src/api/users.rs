//! Registration, login and profile endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{LoginRequest, RegisterUser, User},
};

/// Registration response
#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Generated user ID
    pub id: i32,
    pub message: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(payload): Json<RegisterUser>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let id = state.services.users.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id,
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated user", body = User),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = state.services.users.login(payload).await?;
    Ok(Json(user))
}

/// Get a user's profile
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn profile(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    let user = state.services.users.profile(id).await?;
    Ok(Json(user))
}
