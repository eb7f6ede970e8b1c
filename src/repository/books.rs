//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDetails, UploadBook},
};

const BOOK_DETAILS_SELECT: &str = r#"
    SELECT b.id, b.title, b.author, b.department, b.subject, b.file_url,
           b.access_type, b.uploaded_by, u.name AS uploader_name, b.created_at
    FROM books b
    JOIN users u ON b.uploaded_by = u.id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Persist a book, returning the generated id
    pub async fn create(&self, book: &UploadBook) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, author, department, subject, file_url, access_type, uploaded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.department)
        .bind(&book.subject)
        .bind(&book.file_url)
        .bind(&book.access_type)
        .bind(book.uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Get a book by id, joined with the uploader's name
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDetails> {
        let query = format!("{} WHERE b.id = $1", BOOK_DETAILS_SELECT);

        sqlx::query_as::<_, BookDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search across title, author, department and subject
    pub async fn search(&self, term: &str) -> AppResult<Vec<BookDetails>> {
        let pattern = format!("%{}%", term);
        let query = format!(
            r#"{}
            WHERE b.title ILIKE $1 OR b.author ILIKE $1
               OR b.department ILIKE $1 OR b.subject ILIKE $1
            ORDER BY b.created_at DESC
            "#,
            BOOK_DETAILS_SELECT
        );

        let books = sqlx::query_as::<_, BookDetails>(&query)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Most recently uploaded books
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<BookDetails>> {
        let query = format!("{} ORDER BY b.created_at DESC LIMIT $1", BOOK_DETAILS_SELECT);

        let books = sqlx::query_as::<_, BookDetails>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// All books of a department, ordered by subject
    pub async fn by_department(&self, department: &str) -> AppResult<Vec<BookDetails>> {
        let query = format!(
            "{} WHERE b.department = $1 ORDER BY b.subject",
            BOOK_DETAILS_SELECT
        );

        let books = sqlx::query_as::<_, BookDetails>(&query)
            .bind(department)
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Delete a book by id
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
