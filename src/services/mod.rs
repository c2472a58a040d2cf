//! Business logic services

pub mod auth;
pub mod books;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            books: books::BooksService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the backing store is reachable
    pub async fn ping_store(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
