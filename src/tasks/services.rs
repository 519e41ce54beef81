use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    tasks::repo_types::{NewTask, Task, TaskChanges},
};

/// Who is asking to mutate a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Must own the task.
    Owner(Uuid),
    /// Role gate already passed; ownership is not checked.
    Admin,
}

pub fn ensure_access(task: &Task, access: Access) -> AppResult<()> {
    match access {
        Access::Admin => Ok(()),
        Access::Owner(requester) if requester == task.user_id => Ok(()),
        Access::Owner(requester) => {
            warn!(task_id = %task.id, owner = %task.user_id, %requester, "ownership check failed");
            Err(AppError::forbidden("Not allowed"))
        }
    }
}

async fn load_checked(state: &AppState, task_id: Uuid, access: Access) -> AppResult<Task> {
    let task = state
        .tasks
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;
    ensure_access(&task, access)?;
    Ok(task)
}

pub async fn create(
    state: &AppState,
    owner_id: Uuid,
    title: String,
    description: String,
) -> AppResult<Task> {
    let task = state
        .tasks
        .create(NewTask {
            user_id: owner_id,
            title: title.trim().to_string(),
            description: description.trim().to_string(),
        })
        .await?;
    info!(task_id = %task.id, owner = %owner_id, "task created");
    Ok(task)
}

pub async fn list(state: &AppState, owner_id: Uuid) -> AppResult<Vec<Task>> {
    Ok(state.tasks.list_by_owner(owner_id).await?)
}

pub async fn update(
    state: &AppState,
    task_id: Uuid,
    access: Access,
    mut changes: TaskChanges,
) -> AppResult<Task> {
    load_checked(state, task_id, access).await?;

    changes.title = changes.title.map(|t| t.trim().to_string());
    changes.description = changes.description.map(|d| d.trim().to_string());
    if let Access::Owner(_) = access {
        changes.user_id = None;
    }

    let task = state
        .tasks
        .update(task_id, changes)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;
    info!(task_id = %task.id, ?access, "task updated");
    Ok(task)
}

pub async fn delete(state: &AppState, task_id: Uuid, access: Access) -> AppResult<()> {
    load_checked(state, task_id, access).await?;
    if !state.tasks.delete(task_id).await? {
        return Err(AppError::not_found("Task not found"));
    }
    info!(%task_id, ?access, "task deleted");
    Ok(())
}
