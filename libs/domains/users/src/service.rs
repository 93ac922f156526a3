use observability::Recorder;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserId};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    recorder: Option<Recorder>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            recorder: None,
        }
    }

    /// Report successful mutations to `recorder` (events and counters).
    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    fn record(&self, event_type: &str, counter: &str, user_id: &UserId, data: serde_json::Value) {
        if let Some(recorder) = &self.recorder {
            recorder.record(event_type, counter, user_id.as_str(), data);
        }
    }

    /// Create a new user
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input.validate()?;

        let user = self.repository.create(input).await?;
        self.record(
            "user.created",
            "users_created",
            &user.id,
            json!({ "username": user.username, "email": user.email }),
        );
        Ok(user)
    }

    /// List users, optionally only the active ones
    pub async fn list_users(&self, active_only: bool) -> UserResult<Vec<User>> {
        self.repository.list(active_only).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &UserId) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.clone()))
    }

    /// Update a user's email and/or full name
    pub async fn update_user(&self, id: &UserId, input: UpdateUser) -> UserResult<User> {
        input.validate()?;

        let email_sent = input.email.is_some();
        let name_sent = input.full_name.is_some();

        let user = self.repository.update(id, input).await?;

        let mut changed = serde_json::Map::new();
        if email_sent {
            changed.insert("email".to_string(), json!(user.email));
        }
        if name_sent {
            changed.insert("full_name".to_string(), json!(user.full_name));
        }
        self.record(
            "user.updated",
            "users_updated",
            &user.id,
            json!({ "changes": changed }),
        );
        Ok(user)
    }

    /// Soft delete: the user stays retrievable but is marked inactive
    pub async fn deactivate_user(&self, id: &UserId) -> UserResult<()> {
        let user = self
            .repository
            .deactivate(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.clone()))?;

        self.record(
            "user.deactivated",
            "users_deactivated",
            &user.id,
            json!({ "username": user.username }),
        );
        Ok(())
    }

    /// Hard delete. Returns the removed user's username
    pub async fn delete_user(&self, id: &UserId) -> UserResult<String> {
        let user = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.clone()))?;

        self.record(
            "user.deleted",
            "users_deleted",
            &user.id,
            json!({ "username": user.username }),
        );
        Ok(user.username)
    }

    /// Drop every user. Meant for test isolation only.
    pub async fn reset(&self) -> UserResult<()> {
        self.repository.clear().await
    }
}
