//! Book management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, DeleteResponse, UpdateBook},
    repository::Repository,
};

/// Fixed page size for listings
const RES_PER_PAGE: i64 = 2;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List one page of books, optionally filtered by a title keyword.
    /// A page past the end of the result set yields an empty list.
    pub async fn find_all(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.search(query, RES_PER_PAGE).await
    }

    /// Validate and create a book owned by the authenticated caller
    pub async fn create(&self, book: CreateBook, user_id: Uuid) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.books.create(user_id, &book).await
    }

    /// Get a book by identifier.
    /// A malformed identifier is rejected before the store is queried.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Book> {
        let id = parse_book_id(id)?;
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Apply a partial update to a book, re-validating supplied fields
    pub async fn update_by_id(&self, id: &str, book: UpdateBook) -> AppResult<Book> {
        let id = parse_book_id(id)?;
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository
            .books
            .update(id, &book)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Delete a book by identifier
    pub async fn delete_by_id(&self, id: &str) -> AppResult<DeleteResponse> {
        let id = parse_book_id(id)?;
        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        Ok(DeleteResponse { deleted: true })
    }
}

/// Validates that an identifier is a syntactically well-formed store id
fn parse_book_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest("Invalid book id".to_string()))
}
