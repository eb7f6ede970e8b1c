//! Notification emitter and read-state management
//!
//! Notifications are only ever created by the workflows in this crate
//! (approval, request fulfillment, department broadcast); the handlers
//! below that surface them to users only flip their read flag.

use crate::{
    error::{AppError, AppResult},
    models::{
        notification::{Notification, NotificationType},
        user::UserStatus,
    },
    repository::Repository,
};

/// Message shown to a student whose request was fulfilled
pub fn request_fulfilled_message(title: &str) -> String {
    format!("Your request for '{}' has been fulfilled!", title)
}

/// Message broadcast to a department on a new upload
pub fn book_upload_message(department: &str, title: &str) -> String {
    format!("New book uploaded in {}: {}", department, title)
}

/// Message sent to a user whose account status changed
pub fn approval_message(status: UserStatus) -> String {
    format!("Your account has been {}", status)
}

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create one notification for a single recipient
    pub async fn notify(
        &self,
        recipient_id: i32,
        kind: NotificationType,
        message: &str,
        related_id: Option<i32>,
    ) -> AppResult<()> {
        self.repository
            .notifications
            .insert(recipient_id, kind, message, related_id)
            .await
    }

    /// Broadcast one notification per user of a department, excluding one
    /// user (the uploader). Returns the number of recipients.
    pub async fn notify_department(
        &self,
        department: &str,
        kind: NotificationType,
        message: &str,
        related_id: Option<i32>,
        exclude_user_id: i32,
    ) -> AppResult<u64> {
        self.repository
            .notifications
            .insert_for_department(department, kind, message, related_id, exclude_user_id)
            .await
    }

    /// All notifications of a user, newest first
    pub async fn for_user(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.notifications.for_user(user_id).await
    }

    /// Number of unread notifications of a user
    pub async fn unread_count(&self, user_id: i32) -> AppResult<i64> {
        self.repository.notifications.unread_count(user_id).await
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, id: i32) -> AppResult<()> {
        let affected = self.repository.notifications.mark_read(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound(format!(
                "Notification with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Mark all notifications of a user as read
    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<u64> {
        self.repository.notifications.mark_all_read(user_id).await
    }
}
