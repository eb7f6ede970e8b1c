//! Book request model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Request lifecycle: pending -> fulfilled (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Fulfilled => "fulfilled",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for RequestStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RequestStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RequestStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Book request model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRequest {
    pub id: i32,
    pub student_id: i32,
    pub department: Option<String>,
    pub book_name: String,
    pub status: RequestStatus,
    pub fulfilled_by: Option<i32>,
    pub fulfilled_date: Option<DateTime<Utc>>,
    pub requested_date: DateTime<Utc>,
}

/// Book request joined with user names, for listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookRequestDetails {
    pub id: i32,
    pub student_id: i32,
    pub student_name: String,
    pub department: Option<String>,
    pub book_name: String,
    pub status: RequestStatus,
    pub fulfilled_by: Option<i32>,
    pub fulfilled_by_name: Option<String>,
    pub fulfilled_date: Option<DateTime<Utc>>,
    pub requested_date: DateTime<Utc>,
}

/// Request submission payload
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub student_id: i32,
    pub department: Option<String>,
    pub book_name: String,
}
