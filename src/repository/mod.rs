// src/repository/mod.rs

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::user::{NewUser, User, UserId};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("email {0} is already registered")]
    Duplicate(String),

    /// The record disappeared between load and save.
    #[error("user {0} no longer exists")]
    Missing(UserId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence port for user records.
///
/// Implementations only load and store; merging and classification happen
/// in the service layer.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// All users, oldest first.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Creates a user with registration defaults. Fails with
    /// [`RepoError::Duplicate`] if the email is taken.
    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError>;

    /// Writes back every mutable field of an existing record.
    async fn save(&self, user: &User) -> Result<(), RepoError>;

    /// Removes a user, returning the deleted record if there was one.
    async fn delete(&self, id: UserId) -> Result<Option<User>, RepoError>;
}

pub type UserStore = Arc<dyn UserRepository>;
