//! Book requests repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book_request::{BookRequest, BookRequestDetails, CreateBookRequest},
};

const REQUEST_DETAILS_SELECT: &str = r#"
    SELECT r.id, r.student_id, s.name AS student_name, r.department, r.book_name,
           r.status, r.fulfilled_by, f.name AS fulfilled_by_name,
           r.fulfilled_date, r.requested_date
    FROM book_requests r
    JOIN users s ON r.student_id = s.id
    LEFT JOIN users f ON r.fulfilled_by = f.id
"#;

#[derive(Clone)]
pub struct BookRequestsRepository {
    pool: Pool<Postgres>,
}

impl BookRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Submit a new request, returning the generated id
    pub async fn create(&self, request: &CreateBookRequest) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO book_requests (student_id, department, book_name)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(request.student_id)
        .bind(&request.department)
        .bind(&request.book_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Get a request by id
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<BookRequest>> {
        let request = sqlx::query_as::<_, BookRequest>(
            "SELECT * FROM book_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Atomically transition a pending request to fulfilled.
    ///
    /// The `status = 'pending'` guard makes concurrent fulfillment of the
    /// same request a first-writer-wins race: the loser affects zero rows
    /// and the caller skips the student notification.
    pub async fn fulfill(&self, id: i32, fulfilled_by: i32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE book_requests
            SET status = 'fulfilled', fulfilled_by = $1, fulfilled_date = NOW()
            WHERE id = $2 AND status = 'pending'
            "#,
        )
        .bind(fulfilled_by)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// All requests submitted by a student
    pub async fn for_student(&self, student_id: i32) -> AppResult<Vec<BookRequestDetails>> {
        let query = format!(
            "{} WHERE r.student_id = $1 ORDER BY r.requested_date DESC",
            REQUEST_DETAILS_SELECT
        );

        let requests = sqlx::query_as::<_, BookRequestDetails>(&query)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    /// All requests of a department, pending first then newest
    pub async fn for_department(&self, department: &str) -> AppResult<Vec<BookRequestDetails>> {
        let query = format!(
            r#"{}
            WHERE r.department = $1
            ORDER BY (r.status = 'pending') DESC, r.requested_date DESC
            "#,
            REQUEST_DETAILS_SELECT
        );

        let requests = sqlx::query_as::<_, BookRequestDetails>(&query)
            .bind(department)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    /// All requests across departments, for the super admin view
    pub async fn all(&self) -> AppResult<Vec<BookRequestDetails>> {
        let query = format!(
            r#"{}
            ORDER BY (r.status = 'pending') DESC, r.department, r.requested_date DESC
            "#,
            REQUEST_DETAILS_SELECT
        );

        let requests = sqlx::query_as::<_, BookRequestDetails>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }
}
