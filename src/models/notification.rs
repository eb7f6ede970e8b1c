//! Notification model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

/// Notification category. `related_id` points at the book that triggered
/// a `book_request` or `book_upload` notification; `approval` carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Approval,
    BookRequest,
    BookUpload,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Approval => "approval",
            NotificationType::BookRequest => "book_request",
            NotificationType::BookUpload => "book_upload",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approval" => Ok(NotificationType::Approval),
            "book_request" => Ok(NotificationType::BookRequest),
            "book_upload" => Ok(NotificationType::BookUpload),
            _ => Err(format!("Invalid notification type: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for NotificationType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for NotificationType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for NotificationType {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Notification model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub message: String,
    pub related_id: Option<i32>,
    pub read_status: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_round_trips_through_strings() {
        for kind in [
            NotificationType::Approval,
            NotificationType::BookRequest,
            NotificationType::BookUpload,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationType>().unwrap(), kind);
        }
        assert!("email".parse::<NotificationType>().is_err());
    }

    #[test]
    fn type_serializes_snake_case() {
        let json = serde_json::to_string(&NotificationType::BookUpload).unwrap();
        assert_eq!(json, "\"book_upload\"");
    }
}
