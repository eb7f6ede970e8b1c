//! Repository layer for database operations

pub mod book_requests;
pub mod books;
pub mod notifications;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
    pub book_requests: book_requests::BookRequestsRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_requests: book_requests::BookRequestsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}
