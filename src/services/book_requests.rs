//! Book request submission and listing

use crate::{
    error::{AppError, AppResult},
    models::book_request::{BookRequestDetails, CreateBookRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookRequestsService {
    repository: Repository,
}

impl BookRequestsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Submit a new request; fulfillment happens later via book upload
    pub async fn submit(&self, request: CreateBookRequest) -> AppResult<i32> {
        if request.book_name.trim().is_empty() {
            return Err(AppError::Validation("book_name is required".to_string()));
        }

        // Reject unknown students up front instead of a FK violation
        self.repository.users.get_by_id(request.student_id).await?;

        let id = self.repository.book_requests.create(&request).await?;
        tracing::info!(request_id = id, student_id = request.student_id, "book request submitted");
        Ok(id)
    }

    /// Requests of one student
    pub async fn for_student(&self, student_id: i32) -> AppResult<Vec<BookRequestDetails>> {
        self.repository.book_requests.for_student(student_id).await
    }

    /// Requests of one department, pending first
    pub async fn for_department(&self, department: &str) -> AppResult<Vec<BookRequestDetails>> {
        self.repository.book_requests.for_department(department).await
    }

    /// All requests across departments
    pub async fn all(&self) -> AppResult<Vec<BookRequestDetails>> {
        self.repository.book_requests.all().await
    }
}
