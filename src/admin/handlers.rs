use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    admin::{
        dto::{AdminUpdateTaskRequest, AssignTaskRequest, ChangeRoleRequest},
        services,
    },
    auth::{extractors::AuthUser, repo_types::PublicUser},
    error::AppResult,
    state::AppState,
    tasks::{
        dto::MessageResponse,
        repo_types::{Task, TaskWithOwner},
        services::{self as task_services, Access},
    },
    validation::{ValidJson, ValidPath},
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", delete(delete_user))
        .route("/admin/users/:id/role", patch(change_role))
        .route("/admin/tasks", get(list_tasks))
        .route("/admin/assign-task", post(assign_task))
        .route("/admin/tasks/:id", put(update_task).delete(delete_task))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AuthUser,
) -> AppResult<Json<Vec<PublicUser>>> {
    Ok(Json(services::list_all_users(&state).await?))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    services::delete_user(&state, id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted by admin",
    }))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn change_role(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(body): ValidJson<ChangeRoleRequest>,
) -> AppResult<Json<PublicUser>> {
    Ok(Json(services::change_user_role(&state, id, body.role).await?))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn list_tasks(
    State(state): State<AppState>,
    admin: AuthUser,
) -> AppResult<Json<Vec<TaskWithOwner>>> {
    Ok(Json(services::list_all_tasks(&state).await?))
}

#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn assign_task(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidJson(body): ValidJson<AssignTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = services::assign_task(&state, body.user_id, body.title, body.description).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn update_task(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(body): ValidJson<AdminUpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    let task = task_services::update(&state, id, Access::Admin, body.into()).await?;
    Ok(Json(task))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_task(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    task_services::delete(&state, id, Access::Admin).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted by admin",
    }))
}
