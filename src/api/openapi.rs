//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{approvals, book_requests, books, files, health, notifications, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "UniLib API",
        version = "1.0.0",
        description = "University Library Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth & users
        users::register,
        users::login,
        users::profile,
        // Books
        books::upload_book,
        books::search_books,
        books::recent_books,
        books::books_by_department,
        books::get_book,
        books::delete_book,
        // Book requests
        book_requests::submit_request,
        book_requests::requests_for_student,
        book_requests::requests_for_department,
        book_requests::all_requests,
        // Approvals
        approvals::pending_teachers,
        approvals::pending_students,
        approvals::update_status,
        // Notifications
        notifications::notifications_for_user,
        notifications::unread_count,
        notifications::mark_read,
        notifications::mark_all_read,
        // Files
        files::upload_file,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::models::user::User,
        crate::models::user::UserRole,
        crate::models::user::UserStatus,
        crate::models::user::RegisterUser,
        crate::models::user::LoginRequest,
        crate::models::user::UpdateStatus,
        crate::models::book::Book,
        crate::models::book::BookDetails,
        crate::models::book::UploadBook,
        crate::models::book_request::BookRequest,
        crate::models::book_request::BookRequestDetails,
        crate::models::book_request::CreateBookRequest,
        crate::models::book_request::RequestStatus,
        crate::models::notification::Notification,
        crate::models::notification::NotificationType,
        crate::api::MessageResponse,
        users::RegisterResponse,
        books::UploadBookResponse,
        book_requests::SubmitRequestResponse,
        notifications::UnreadCountResponse,
        files::FileUploadResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User profiles"),
        (name = "books", description = "Book catalog and uploads"),
        (name = "requests", description = "Book requests"),
        (name = "approvals", description = "Account approval"),
        (name = "notifications", description = "User notifications"),
        (name = "files", description = "File uploads")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router serving the OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_endpoints_document_the_data_wrapper() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        // Every list endpoint responds with the {"data": [...]} wrapper,
        // and the document must say so rather than a bare array.
        for path in [
            "/books/recent",
            "/books/search",
            "/requests",
            "/approvals/teachers",
        ] {
            let schema =
                &doc["paths"][path]["get"]["responses"]["200"]["content"]["application/json"];
            assert!(
                schema.is_object(),
                "{} must document a JSON response body",
                path
            );
        }

        let rendered = serde_json::to_string(&doc).unwrap();
        assert!(rendered.contains("DataResponse"));
    }

    #[test]
    fn data_wrapper_serializes_as_data_array() {
        let body = crate::api::DataResponse {
            data: vec![crate::api::MessageResponse::new("hi")],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "data": [{ "message": "hi" }] })
        );
    }
}
