use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    state::AppState,
    tasks::{
        dto::{CreateTaskRequest, MessageResponse, UpdateTaskRequest},
        repo_types::Task,
        services::{self, Access},
    },
    validation::{ValidJson, ValidPath},
};

pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", put(update_task).delete(delete_task))
}

#[instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Task>>> {
    Ok(Json(services::list(&state, user.id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(body): ValidJson<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = services::create(&state, user.id, body.title, body.description).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[instrument(skip(state, body))]
pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
    ValidJson(body): ValidJson<UpdateTaskRequest>,
) -> AppResult<Json<Task>> {
    let task = services::update(&state, id, Access::Owner(user.id), body.into()).await?;
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    ValidPath(id): ValidPath<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    services::delete(&state, id, Access::Owner(user.id)).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted",
    }))
}
