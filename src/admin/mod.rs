pub mod dto;
pub mod handlers;
pub mod services;

use crate::{
    auth::{
        extractors::{authenticate, require_role},
        repo_types::Role,
    },
    state::AppState,
};
use axum::{extract::Request, middleware, middleware::Next, Router};

/// Authenticate, then require `Role::Admin`.
pub fn router(state: &AppState) -> Router<AppState> {
    handlers::admin_routes()
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            require_role(Role::Admin, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}
