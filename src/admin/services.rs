use tracing::info;
use uuid::Uuid;

use crate::{
    auth::repo_types::{PublicUser, Role},
    error::{AppError, AppResult},
    state::AppState,
    tasks::{
        repo_types::{Task, TaskWithOwner},
        services as task_services,
    },
};

pub async fn list_all_users(state: &AppState) -> AppResult<Vec<PublicUser>> {
    let users = state.users.list().await?;
    Ok(users.into_iter().map(PublicUser::from).collect())
}

pub async fn delete_user(state: &AppState, user_id: Uuid) -> AppResult<()> {
    if !state.users.delete(user_id).await? {
        return Err(AppError::not_found("User not found"));
    }
    info!(%user_id, "user deleted with their tasks");
    Ok(())
}

/// No self-demotion guard: an admin may drop their own role. Tokens already
/// issued keep the old role until they expire.
pub async fn change_user_role(state: &AppState, user_id: Uuid, role: Role) -> AppResult<PublicUser> {
    let user = state
        .users
        .set_role(user_id, role)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    info!(%user_id, %role, "user role changed");
    Ok(user.into())
}

pub async fn list_all_tasks(state: &AppState) -> AppResult<Vec<TaskWithOwner>> {
    Ok(state.tasks.list_with_owner().await?)
}

pub async fn assign_task(
    state: &AppState,
    user_id: Uuid,
    title: String,
    description: String,
) -> AppResult<Task> {
    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }
    task_services::create(state, user_id, title, description).await
}
