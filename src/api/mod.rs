//! API handlers for UniLib REST endpoints

pub mod approvals;
pub mod book_requests;
pub mod books;
pub mod files;
pub mod health;
pub mod notifications;
pub mod openapi;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// List payload wrapper, matching the `{"data": [...]}` shape clients expect
#[derive(Serialize, ToSchema)]
pub struct DataResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub data: Vec<T>,
}

/// Simple status message payload
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
