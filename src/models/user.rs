// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::topic::{TopicMap, TopicProgress};

pub type UserId = i64;

/// Represents the 'users' table in the database.
///
/// Serialized with the camelCase field names the clients use; per-topic
/// progress is flattened into `<topic>Marks` / `<topic>Time` keys.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    pub name: String,

    /// Unique, used as the login key.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// User role: 'user' or 'admin'.
    pub role: String,

    pub age: String,
    pub phone_num: String,
    pub gender: String,
    pub preferred_study_method: String,
    pub disliked_lesson: String,
    pub stress_probability: f64,
    pub stress_level: String,

    /// "Very High", "High", "Average" or "Low" once computed; empty until then.
    pub cognitive_performance: String,

    #[sqlx(json)]
    #[serde(flatten)]
    pub progress: TopicMap<TopicProgress>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    /// Builds the full record for a freshly registered account.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            password: new_user.password_hash,
            role: new_user.role,
            age: "0".to_string(),
            phone_num: "0".to_string(),
            gender: "Other".to_string(),
            preferred_study_method: "None".to_string(),
            disliked_lesson: "None".to_string(),
            stress_probability: 0.0,
            stress_level: String::new(),
            cognitive_performance: String::new(),
            progress: TopicMap::default(),
            created_at: Some(chrono::Utc::now()),
        }
    }
}

/// Account data needed to create a user; everything else starts at defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: String) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash,
            role: "user".to_string(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// DTO for creating a new user (Registration).
/// Missing fields deserialize as empty so they surface as validation errors.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Subset of the profile returned alongside a fresh token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub stress_level: String,
    pub stress_probability: f64,
    pub cognitive_performance: String,
}

impl From<&User> for LoginUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            stress_level: user.stress_level.clone(),
            stress_probability: user.stress_probability,
            cognitive_performance: user.cognitive_performance.clone(),
        }
    }
}

/// Confirmation payload for an administrative delete.
#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub id: UserId,
    pub name: String,
}
