//! Notifications repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::notification::{Notification, NotificationType},
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a single notification for one recipient
    pub async fn insert(
        &self,
        user_id: i32,
        kind: NotificationType,
        message: &str,
        related_id: Option<i32>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, type, message, related_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(message)
        .bind(related_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert one notification for the student owning a request.
    ///
    /// The recipient is resolved inside the statement so no separate read
    /// of the request row is needed.
    pub async fn insert_for_request_owner(
        &self,
        request_id: i32,
        kind: NotificationType,
        message: &str,
        related_id: Option<i32>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, type, message, related_id)
            SELECT student_id, $1, $2, $3 FROM book_requests WHERE id = $4
            "#,
        )
        .bind(kind)
        .bind(message)
        .bind(related_id)
        .bind(request_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Insert one notification per user of a department, excluding one user.
    ///
    /// A single set-based statement: the broadcast is all-or-nothing at the
    /// database level and never degenerates into an N+1 loop.
    pub async fn insert_for_department(
        &self,
        department: &str,
        kind: NotificationType,
        message: &str,
        related_id: Option<i32>,
        exclude_user_id: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (user_id, type, message, related_id)
            SELECT id, $1, $2, $3 FROM users
            WHERE department = $4 AND id != $5
            "#,
        )
        .bind(kind)
        .bind(message)
        .bind(related_id)
        .bind(department)
        .bind(exclude_user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// All notifications of a user, newest first
    pub async fn for_user(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Number of unread notifications of a user
    pub async fn unread_count(&self, user_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT read_status",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("UPDATE notifications SET read_status = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Mark all notifications of a user as read
    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<u64> {
        let result = sqlx::query("UPDATE notifications SET read_status = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
