//! Book catalog and the request-fulfillment workflow

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDetails, UploadBook},
        notification::NotificationType,
    },
    repository::Repository,
    services::notifications::{book_upload_message, request_fulfilled_message},
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Upload a book and fan out its side effects.
    ///
    /// The workflow runs as sequential independent statements, not a
    /// transaction: once the book insert commits the caller gets a success,
    /// and failures of the later steps are logged and swallowed. A crash
    /// between steps can leave a book without its notifications; that is
    /// the documented best-effort contract of this endpoint.
    ///
    /// 1. Persist the book. A failure here aborts the workflow.
    /// 2. If `request_id` is set, transition that request to fulfilled and
    ///    notify its student. The update only matches pending rows, so a
    ///    missing or already-fulfilled request is a no-op and a concurrent
    ///    double upload cannot notify the student twice.
    /// 3. Broadcast one notification per department user except the
    ///    uploader, as a single set-based insert.
    pub async fn upload_book(&self, book: UploadBook) -> AppResult<i32> {
        if book.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }
        if book.file_url.trim().is_empty() {
            return Err(AppError::Validation("file_url is required".to_string()));
        }

        let book_id = self.repository.books.create(&book).await?;
        tracing::info!(book_id, uploaded_by = book.uploaded_by, title = %book.title, "book uploaded");

        if let Some(request_id) = book.request_id {
            self.fulfill_request(request_id, &book, book_id).await;
        }

        if let Some(ref department) = book.department {
            let message = book_upload_message(department, &book.title);
            match self
                .repository
                .notifications
                .insert_for_department(
                    department,
                    NotificationType::BookUpload,
                    &message,
                    Some(book_id),
                    book.uploaded_by,
                )
                .await
            {
                Ok(recipients) => {
                    tracing::debug!(book_id, recipients, "department broadcast sent");
                }
                Err(e) => {
                    tracing::warn!(book_id, error = %e, "department broadcast failed");
                }
            }
        }

        Ok(book_id)
    }

    /// Step 2 of the upload workflow. Never fails the upload: every error
    /// path logs and returns.
    async fn fulfill_request(&self, request_id: i32, book: &UploadBook, book_id: i32) {
        match self
            .repository
            .book_requests
            .fulfill(request_id, book.uploaded_by)
            .await
        {
            Ok(0) => {
                tracing::debug!(request_id, "request missing or already fulfilled, skipping");
            }
            Ok(_) => {
                let message = request_fulfilled_message(&book.title);
                if let Err(e) = self
                    .repository
                    .notifications
                    .insert_for_request_owner(
                        request_id,
                        NotificationType::BookRequest,
                        &message,
                        Some(book_id),
                    )
                    .await
                {
                    tracing::warn!(request_id, error = %e, "failed to notify requester");
                }
            }
            Err(e) => {
                tracing::warn!(request_id, error = %e, "failed to fulfill request");
            }
        }
    }

    /// Get a book by id
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await
    }

    /// Search across title, author, department and subject. An empty term
    /// yields an empty result instead of matching everything.
    pub async fn search(&self, term: &str) -> AppResult<Vec<BookDetails>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.repository.books.search(term).await
    }

    /// Ten most recently uploaded books
    pub async fn recent(&self) -> AppResult<Vec<BookDetails>> {
        self.repository.books.recent(10).await
    }

    /// All books of a department
    pub async fn by_department(&self, department: &str) -> AppResult<Vec<BookDetails>> {
        self.repository.books.by_department(department).await
    }

    /// Delete a book by id
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
