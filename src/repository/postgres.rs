// src/repository/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use super::{RepoError, UserRepository};
use crate::models::user::{NewUser, User, UserId};

const USER_COLUMNS: &str = r#"
    id, name, email, password, role,
    age, phone_num, gender, preferred_study_method, disliked_lesson,
    stress_probability, stress_level, cognitive_performance,
    progress, created_at
"#;

/// PostgreSQL implementation of [`UserRepository`].
/// Per-topic progress lives in the JSONB `progress` column.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, RepoError> {
        // Registration defaults come from the model, not from column defaults.
        let template = User::from_new(0, new_user);

        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                name, email, password, role,
                age, phone_num, gender, preferred_study_method, disliked_lesson,
                stress_probability, stress_level, cognitive_performance, progress
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&template.name)
        .bind(&template.email)
        .bind(&template.password)
        .bind(&template.role)
        .bind(&template.age)
        .bind(&template.phone_num)
        .bind(&template.gender)
        .bind(&template.preferred_study_method)
        .bind(&template.disliked_lesson)
        .bind(template.stress_probability)
        .bind(&template.stress_level)
        .bind(&template.cognitive_performance)
        .bind(Json(&template.progress))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if duplicate {
                RepoError::Duplicate(template.email.clone())
            } else {
                tracing::error!("Failed to insert user: {:?}", e);
                RepoError::Database(e)
            }
        })
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                age = $3,
                phone_num = $4,
                gender = $5,
                preferred_study_method = $6,
                disliked_lesson = $7,
                stress_probability = $8,
                stress_level = $9,
                cognitive_performance = $10,
                progress = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.age)
        .bind(&user.phone_num)
        .bind(&user.gender)
        .bind(&user.preferred_study_method)
        .bind(&user.disliked_lesson)
        .bind(user.stress_probability)
        .bind(&user.stress_level)
        .bind(&user.cognitive_performance)
        .bind(Json(&user.progress))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::Missing(user.id));
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
