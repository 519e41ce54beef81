//! Request gates.
//!
//! `authenticate` resolves the bearer token into an [`AuthUser`] stored in the
//! request extensions; `require_role` then compares that identity's role with
//! exactly one required role. Layer them in that order.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{jwt::JwtKeys, repo_types::Role},
    error::AppError,
};

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AppError::unauthorized("Unauthorized"));
    }
    Ok(token.trim())
}

pub fn authenticate_headers(keys: &JwtKeys, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let token = bearer_token(headers)?;
    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "rejected bearer token");
        AppError::unauthorized("Invalid or expired token")
    })?;
    Ok(AuthUser {
        id: claims.sub,
        role: claims.role,
    })
}

/// Middleware: verify the bearer token and attach the identity.
pub async fn authenticate(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_headers(&keys, req.headers())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Middleware: the attached identity must hold `required`.
///
/// ```ignore
/// router.route_layer(middleware::from_fn(|req: Request, next: Next| {
///     require_role(Role::Admin, req, next)
/// }))
/// ```
pub async fn require_role(required: Role, req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

    if user.role != required {
        warn!(user_id = %user.id, role = %user.role, required = %required, "role check failed");
        return Err(AppError::forbidden(format!("{required} access required")));
    }
    Ok(next.run(req).await)
}

/// Reuses the identity from `authenticate` when present, otherwise verifies
/// the header itself.
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }
        let keys = JwtKeys::from_ref(state);
        let user = authenticate_headers(&keys, &parts.headers)?;
        parts.extensions.insert(user);
        Ok(user)
    }
}
