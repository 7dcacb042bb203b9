//! User repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{User, UserId};

/// Repository trait for back-office users.
///
/// Username uniqueness is enforced here so that check-and-insert happens
/// under a single lock.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no user has this id
    async fn get_user(&self, id: UserId) -> RepositoryResult<User>;

    /// Exact, case-sensitive username lookup.
    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Store a user with an already-hashed password.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ConflictError)` if the username is taken
    async fn insert_user(&self, username: String, password_hash: String)
        -> RepositoryResult<User>;

    /// Replace the username and/or password hash.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no user has this id
    /// * `Err(RepositoryError::ConflictError)` if the new username belongs to another user
    async fn update_user(
        &self,
        id: UserId,
        username: Option<String>,
        password_hash: Option<String>,
    ) -> RepositoryResult<User>;

    async fn delete_user(&self, id: UserId) -> RepositoryResult<User>;
}
