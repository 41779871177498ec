// src/repository/memory.rs

//! In-memory user store for tests and database-less local runs.
//! Contents are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RepoError, UserRepository};
use crate::models::user::{NewUser, User, UserId};

#[derive(Debug, Default)]
struct Inner {
    last_id: UserId,
    users: BTreeMap<UserId, User>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == new_user.email) {
            return Err(RepoError::Duplicate(new_user.email));
        }

        inner.last_id += 1;
        let user = User::from_new(inner.last_id, new_user);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;

        match inner.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(RepoError::Missing(user.id)),
        }
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.inner.write().await.users.remove(&id))
    }
}
