//! Persistence seams.
//!
//! Handlers never touch the pool directly; they go through these traits so the
//! Postgres implementations (`auth::repo`, `tasks::repo`) can be swapped for the
//! in-memory one when the router is exercised in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, Role, User};
use crate::tasks::repo_types::{NewTask, Task, TaskChanges, TaskWithOwner};

#[cfg(test)]
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("referenced user does not exist")]
    MissingOwner,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Fails with `StoreError::DuplicateEmail` when the email is taken.
    async fn create(&self, new: NewUser) -> StoreResult<User>;

    /// All users, newest first.
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Returns `None` if no such user exists.
    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<User>>;

    /// Removes the user and every task they own. Returns `false` if absent.
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait TaskRepo: Send + Sync {
    /// Fails with `StoreError::MissingOwner` when `user_id` references nobody.
    async fn create(&self, new: NewTask) -> StoreResult<Task>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Tasks owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Every task joined with its owner, newest first.
    async fn list_with_owner(&self) -> StoreResult<Vec<TaskWithOwner>>;

    /// Applies the set fields of `changes` and bumps `updated_at`.
    /// Returns `None` if the task vanished.
    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>>;

    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
