//! Business logic services

pub mod approvals;
pub mod book_requests;
pub mod library;
pub mod notifications;
pub mod storage;
pub mod users;

use crate::{
    config::{StorageConfig, UsersConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub approvals: approvals::ApprovalsService,
    pub library: library::LibraryService,
    pub book_requests: book_requests::BookRequestsService,
    pub notifications: notifications::NotificationsService,
    pub storage: storage::StorageService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, users_config: UsersConfig, storage_config: StorageConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), users_config),
            approvals: approvals::ApprovalsService::new(repository.clone()),
            library: library::LibraryService::new(repository.clone()),
            book_requests: book_requests::BookRequestsService::new(repository.clone()),
            notifications: notifications::NotificationsService::new(repository.clone()),
            storage: storage::StorageService::new(storage_config),
            repository,
        }
    }

    /// Check database connectivity, for the readiness probe
    pub async fn db_ready(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        Ok(())
    }
}
