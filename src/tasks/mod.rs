pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

use crate::{auth::extractors::authenticate, state::AppState};
use axum::{middleware, Router};

/// Any authenticated caller may manage their own tasks.
pub fn router(state: &AppState) -> Router<AppState> {
    handlers::task_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}
