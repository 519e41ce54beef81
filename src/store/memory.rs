//! In-memory repositories used by the router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{StoreError, StoreResult, TaskRepo, UserRepo};
use crate::auth::repo_types::{NewUser, Role, User};
use crate::tasks::repo_types::{NewTask, OwnerSummary, Task, TaskChanges, TaskWithOwner};

#[derive(Default)]
struct Tables {
    // insertion order == creation order
    users: Vec<User>,
    tasks: Vec<Task>,
}

/// Implements both repos over one lock so user deletion can cascade.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new: NewUser) -> StoreResult<User> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: Role::User,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().rev().cloned().collect())
    }

    async fn set_role(&self, id: Uuid, role: Role) -> StoreResult<Option<User>> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        if t.users.len() == before {
            return Ok(false);
        }
        t.tasks.retain(|task| task.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TaskRepo for MemoryStore {
    async fn create(&self, new: NewTask) -> StoreResult<Task> {
        let mut t = self.tables.lock().unwrap();
        if !t.users.iter().any(|u| u.id == new.user_id) {
            return Err(StoreError::MissingOwner);
        }
        let now = OffsetDateTime::now_utc();
        let task = Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            completed: false,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        t.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let t = self.tables.lock().unwrap();
        Ok(t.tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Task>> {
        let t = self.tables.lock().unwrap();
        Ok(t.tasks
            .iter()
            .rev()
            .filter(|task| task.user_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_with_owner(&self) -> StoreResult<Vec<TaskWithOwner>> {
        let t = self.tables.lock().unwrap();
        Ok(t.tasks
            .iter()
            .rev()
            .filter_map(|task| {
                let owner = t.users.iter().find(|u| u.id == task.user_id)?;
                Some(TaskWithOwner {
                    task: task.clone(),
                    user: OwnerSummary {
                        id: owner.id,
                        name: owner.name.clone(),
                        email: owner.email.clone(),
                    },
                })
            })
            .collect())
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        let mut t = self.tables.lock().unwrap();
        if let Some(owner) = changes.user_id {
            if !t.users.iter().any(|u| u.id == owner) {
                return Err(StoreError::MissingOwner);
            }
        }
        let Some(task) = t.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = description;
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        if let Some(user_id) = changes.user_id {
            task.user_id = user_id;
        }
        task.updated_at = OffsetDateTime::now_utc();
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.tasks.len();
        t.tasks.retain(|task| task.id != id);
        Ok(t.tasks.len() != before)
    }
}
