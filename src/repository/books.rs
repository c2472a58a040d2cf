//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBook, UpdateBook},
};

/// Offset of a 1-based page. Pages below 1 are clamped to the first page.
fn page_offset(page: i64, per_page: i64) -> i64 {
    (page.max(1) - 1) * per_page
}

/// Escapes LIKE wildcards so a keyword is matched literally
fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books matching the query, one fixed-size page at a time.
    /// A keyword filters on case-insensitive title substring; ordering is
    /// insertion order. An empty page is a valid result, never an error.
    pub async fn search(&self, query: &BookQuery, per_page: i64) -> AppResult<Vec<Book>> {
        let offset = page_offset(query.page.unwrap_or(1), per_page);
        let keyword = query.keyword.as_deref().map(escape_like);

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, user_id, title, description, author, price, category,
                   created_at, updated_at
            FROM books
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(keyword)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Insert a new book stamped with the owning user identifier
    pub async fn create(&self, user_id: Uuid, book: &CreateBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (user_id, title, description, author, price, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, description, author, price, category,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.author)
        .bind(book.price)
        .bind(book.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Find a book by identifier
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, user_id, title, description, author, price, category,
                   created_at, updated_at
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Apply a partial field set to an existing book.
    /// Returns None when no record exists for the identifier.
    pub async fn update(&self, id: Uuid, book: &UpdateBook) -> AppResult<Option<Book>> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                author = COALESCE($4, author),
                price = COALESCE($5, price),
                category = COALESCE($6, category),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, title, description, author, price, category,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.author)
        .bind(book.price)
        .bind(book.category)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Remove a book by identifier. Returns false when nothing was deleted.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
