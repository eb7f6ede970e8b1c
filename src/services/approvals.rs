//! Account approval workflow

use crate::{
    error::{AppError, AppResult},
    models::{
        notification::NotificationType,
        user::{User, UserStatus},
    },
    repository::Repository,
    services::notifications::approval_message,
};

#[derive(Clone)]
pub struct ApprovalsService {
    repository: Repository,
}

impl ApprovalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Change a user's status and tell them about it.
    ///
    /// The notification is gated on the affected-row count: an unknown
    /// user id is a 404 and emits nothing. The notification itself is
    /// best-effort once the status update committed.
    pub async fn update_status(&self, user_id: i32, status: UserStatus) -> AppResult<()> {
        if status == UserStatus::Pending {
            return Err(AppError::Validation(
                "status must be approved or rejected".to_string(),
            ));
        }

        let affected = self.repository.users.update_status(user_id, status).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!(
                "User with id {} not found",
                user_id
            )));
        }

        tracing::info!(user_id, status = %status, "account status updated");

        let message = approval_message(status);
        if let Err(e) = self
            .repository
            .notifications
            .insert(user_id, NotificationType::Approval, &message, None)
            .await
        {
            tracing::warn!(user_id, error = %e, "failed to notify user of status change");
        }

        Ok(())
    }

    /// Teacher admins awaiting approval
    pub async fn pending_teachers(&self) -> AppResult<Vec<User>> {
        self.repository.users.pending_teachers().await
    }

    /// Students of a department awaiting approval
    pub async fn pending_students(&self, department: &str) -> AppResult<Vec<User>> {
        self.repository.users.pending_students(department).await
    }
}
