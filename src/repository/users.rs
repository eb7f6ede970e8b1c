//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserRole, UserStatus},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Total number of registered users (drives the admin bootstrap rule)
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Create a new user, returning the generated id
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        department: Option<&str>,
        approved_subjects: &[String],
        id_card_url: Option<&str>,
        status: UserStatus,
    ) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (name, email, password_hash, role, department, approved_subjects, id_card_url, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(department)
        .bind(approved_subjects)
        .bind(id_card_url)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Update a user's status, returning the number of affected rows
    pub async fn update_status(&self, id: i32, status: UserStatus) -> AppResult<u64> {
        let result = sqlx::query("UPDATE users SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Pending teacher admins awaiting approval
    pub async fn pending_teachers(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 AND status = $2 ORDER BY created_at",
        )
        .bind(UserRole::TeacherAdmin)
        .bind(UserStatus::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Pending students of a department awaiting approval
    pub async fn pending_students(&self, department: &str) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 AND status = $2 AND department = $3 ORDER BY created_at",
        )
        .bind(UserRole::Student)
        .bind(UserStatus::Pending)
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
