use tracing::{info, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        password::{hash_password_blocking, verify_password_blocking},
        repo_types::{NewUser, User},
    },
    error::{AppError, AppResult},
    state::AppState,
};

fn auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let token = state
        .jwt
        .issue(user.id, user.role)
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(AuthResponse {
        user: user.into(),
        token,
    })
}

pub async fn register(state: &AppState, req: RegisterRequest) -> AppResult<AuthResponse> {
    let email = req.email.trim().to_string();

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = hash_password_blocking(req.password).await?;

    // a concurrent registration can still win the race; the unique index
    // turns that into DuplicateEmail as well
    let user = state
        .users
        .create(NewUser {
            name: req.name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    auth_response(state, user)
}

pub async fn login(state: &AppState, req: LoginRequest) -> AppResult<AuthResponse> {
    let email = req.email.trim();
    let user = state.users.find_by_email(email).await?;

    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let ok = verify_password_blocking(req.password, stored_hash).await?;

    let user = match user {
        Some(user) if ok => user,
        Some(user) => {
            warn!(user_id = %user.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }
        None => {
            warn!(%email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    info!(user_id = %user.id, "user logged in");
    auth_response(state, user)
}
