//! Registration, login and profile service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::UsersConfig,
    error::{AppError, AppResult},
    models::user::{LoginRequest, RegisterUser, User, UserRole, UserStatus},
    repository::Repository,
};

/// Role and status a registration actually gets.
///
/// The very first account, and the configured bootstrap email, become an
/// approved Super Admin so a fresh deployment always has an approver.
/// Everyone else keeps the requested role and waits for approval.
pub fn bootstrap_role(
    requested: UserRole,
    email: &str,
    existing_users: i64,
    bootstrap_email: &str,
) -> (UserRole, UserStatus) {
    if existing_users == 0 || email.eq_ignore_ascii_case(bootstrap_email) {
        (UserRole::SuperAdmin, UserStatus::Approved)
    } else {
        (requested, UserStatus::Pending)
    }
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: UsersConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: UsersConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user, returning the generated id
    pub async fn register(&self, payload: RegisterUser) -> AppResult<i32> {
        payload
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&payload.email).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let existing_users = self.repository.users.count().await?;
        let (role, status) = bootstrap_role(
            payload.role,
            &payload.email,
            existing_users,
            &self.config.bootstrap_admin_email,
        );

        let password_hash = self.hash_password(&payload.password)?;

        let id = self
            .repository
            .users
            .create(
                &payload.name,
                &payload.email,
                &password_hash,
                role,
                payload.department.as_deref(),
                &payload.approved_subjects,
                payload.id_card_url.as_deref(),
                status,
            )
            .await?;

        tracing::info!(user_id = id, role = %role, status = %status, "user registered");
        Ok(id)
    }

    /// Authenticate by email and password, returning the user
    pub async fn login(&self, payload: LoginRequest) -> AppResult<User> {
        let user = self
            .repository
            .users
            .get_by_email(&payload.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&payload.password, &user.password_hash)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }

    /// Get a user's profile
    pub async fn profile(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against its stored hash
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOTSTRAP: &str = "admin@university.edu";

    #[test]
    fn first_user_becomes_super_admin() {
        let (role, status) = bootstrap_role(UserRole::Student, "someone@uni.edu", 0, BOOTSTRAP);
        assert_eq!(role, UserRole::SuperAdmin);
        assert_eq!(status, UserStatus::Approved);
    }

    #[test]
    fn bootstrap_email_becomes_super_admin_regardless_of_count() {
        let (role, status) = bootstrap_role(UserRole::Student, "Admin@University.EDU", 42, BOOTSTRAP);
        assert_eq!(role, UserRole::SuperAdmin);
        assert_eq!(status, UserStatus::Approved);
    }

    #[test]
    fn other_users_keep_requested_role_and_wait_for_approval() {
        let (role, status) = bootstrap_role(UserRole::TeacherAdmin, "teacher@uni.edu", 3, BOOTSTRAP);
        assert_eq!(role, UserRole::TeacherAdmin);
        assert_eq!(status, UserStatus::Pending);
    }
}
