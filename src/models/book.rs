//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book category, restricted to a fixed set of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Adventure,
    Classics,
    Crime,
    Fantasy,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adventure => "ADVENTURE",
            Category::Classics => "CLASSICS",
            Category::Crime => "CRIME",
            Category::Fantasy => "FANTASY",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADVENTURE" => Ok(Category::Adventure),
            "CLASSICS" => Ok(Category::Classics),
            "CRIME" => Ok(Category::Crime),
            "FANTASY" => Ok(Category::Fantasy),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

// SQLx conversion for Category, stored as text
impl sqlx::Type<Postgres> for Category {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for Category {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for Category {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// A book record owned by a user.
///
/// The owning user identifier is stamped at creation from the authenticated
/// caller and never changes afterwards.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Identifier of the owning user
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub author: String,
    pub price: f64,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request; all fields are required.
///
/// Any owner field present in the payload is ignored, the owner is always
/// taken from the authenticated caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: String,
    pub author: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    pub category: Category,
}

/// Partial update request; only supplied fields are applied, re-validated
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    pub category: Option<Category>,
}

/// Book listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Case-insensitive substring match on the title
    pub keyword: Option<String>,
}

/// Deletion acknowledgment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub deleted: bool,
}
