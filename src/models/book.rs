//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub file_url: String,
    pub access_type: Option<String>,
    pub uploaded_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Book joined with the uploader's name, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub file_url: String,
    pub access_type: Option<String>,
    pub uploaded_by: i32,
    pub uploader_name: String,
    pub created_at: DateTime<Utc>,
}

/// Book upload payload, the input of the fulfillment workflow
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UploadBook {
    pub title: String,
    pub author: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub file_url: String,
    pub access_type: Option<String>,
    pub uploaded_by: i32,
    /// When set, the upload also fulfills this outstanding book request
    pub request_id: Option<i32>,
}
