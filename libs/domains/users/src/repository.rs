use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserId};

/// Repository trait for User persistence
///
/// Uniqueness checks belong to the repository so that check-then-write is a
/// single step for any implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; username is checked before email
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Get a user by ID (active or not)
    async fn get_by_id(&self, id: &UserId) -> UserResult<Option<User>>;

    /// List users in insertion order
    async fn list(&self, active_only: bool) -> UserResult<Vec<User>>;

    /// Apply an update to an existing user
    async fn update(&self, id: &UserId, input: UpdateUser) -> UserResult<User>;

    /// Soft delete. Returns the updated user, or `None` if unknown
    async fn deactivate(&self, id: &UserId) -> UserResult<Option<User>>;

    /// Hard delete. Returns the removed user, or `None` if unknown
    async fn delete(&self, id: &UserId) -> UserResult<Option<User>>;

    /// Remove every user
    async fn clear(&self) -> UserResult<()>;
}

/// Rows keyed by insertion sequence, plus an id index.
#[derive(Debug, Default)]
struct UserTable {
    rows: BTreeMap<u64, User>,
    index: HashMap<UserId, u64>,
    next_seq: u64,
}

impl UserTable {
    fn get(&self, id: &UserId) -> Option<&User> {
        self.index.get(id).and_then(|seq| self.rows.get(seq))
    }

    fn get_mut(&mut self, id: &UserId) -> Option<&mut User> {
        let seq = self.index.get(id)?;
        self.rows.get_mut(seq)
    }

    fn values(&self) -> impl Iterator<Item = &User> {
        self.rows.values()
    }

    fn insert(&mut self, user: User) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(user.id.clone(), seq);
        self.rows.insert(seq, user);
    }

    fn remove(&mut self, id: &UserId) -> Option<User> {
        let seq = self.index.remove(id)?;
        self.rows.remove(&seq)
    }

    fn username_taken(&self, username: &str) -> bool {
        self.values().any(|u| u.username == username)
    }

    fn email_taken(&self, email: &str, except: Option<&UserId>) -> bool {
        self.values().any(|u| u.email == email && Some(&u.id) != except)
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let input = input.normalized();
        let mut users = self.users.write().await;

        if users.username_taken(&input.username) {
            return Err(UserError::UsernameTaken(input.username));
        }
        if users.email_taken(&input.email, None) {
            return Err(UserError::EmailTaken(input.email));
        }

        let user = User::new(input);
        users.insert(user.clone());

        tracing::info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: &UserId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn list(&self, active_only: bool) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| !active_only || u.is_active)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &UserId, input: UpdateUser) -> UserResult<User> {
        let input = input.normalized();
        let mut users = self.users.write().await;

        let current_email = match users.get(id) {
            Some(user) => user.email.clone(),
            None => return Err(UserError::NotFound(id.clone())),
        };

        if let Some(ref new_email) = input.email {
            if *new_email != current_email && users.email_taken(new_email, Some(id)) {
                return Err(UserError::EmailTaken(new_email.clone()));
            }
        }

        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.clone()))?;
        user.apply_update(input);

        tracing::info!(user_id = %id, "Updated user");
        Ok(user.clone())
    }

    async fn deactivate(&self, id: &UserId) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(id) else {
            return Ok(None);
        };
        user.deactivate();

        tracing::info!(user_id = %id, "Deactivated user");
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &UserId) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;
        let removed = users.remove(id);

        if removed.is_some() {
            tracing::info!(user_id = %id, "Deleted user");
        }

        Ok(removed)
    }

    async fn clear(&self) -> UserResult<()> {
        self.users.write().await.clear();
        tracing::info!("Cleared user table");
        Ok(())
    }
}
