//! Domain models

pub mod book;
pub mod book_request;
pub mod notification;
pub mod user;
