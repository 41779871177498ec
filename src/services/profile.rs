// src/services/profile.rs

use std::sync::Arc;

use thiserror::Error;

use super::{merge::merge_profile, performance::classify};
use crate::{
    models::{
        profile_update::ProfileUpdate,
        user::{User, UserId},
    },
    repository::{RepoError, UserRepository},
    utils::locks::KeyedLocks,
};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("user {0} not found")]
    NotFound(UserId),

    #[error("profile store failed: {0}")]
    Persistence(#[from] RepoError),
}

/// Read-merge-classify-write for user profiles.
///
/// Updates to the same user id are serialized within this process, so two
/// concurrent mark submissions both land in the history. Separate processes
/// sharing one database are not coordinated; there the last save wins.
#[derive(Clone)]
pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    locks: KeyedLocks<UserId>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            locks: KeyedLocks::new(),
        }
    }

    pub async fn get_profile(&self, id: UserId) -> Result<User, ProfileError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound(id))
    }

    /// Applies `update` to the stored profile and returns the saved record.
    ///
    /// `cognitivePerformance` is recomputed only when the update appended at
    /// least one mark and did not set the label itself.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, ProfileError> {
        let _guard = self.locks.lock(id).await;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound(id))?;

        let marks_updated = merge_profile(&mut user, update);

        if marks_updated && update.cognitive_performance.is_none() {
            let level = classify(&user);
            tracing::debug!(user_id = id, %level, "Recomputed cognitive performance");
            user.cognitive_performance = level.as_str().to_string();
        }

        self.users.save(&user).await.map_err(|e| {
            tracing::error!("Failed to save profile for user {}: {:?}", id, e);
            ProfileError::from(e)
        })?;

        Ok(user)
    }
}
