use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{claims::Claims, repo_types::Role},
    config::{JwtConfig, MAX_TTL_MINUTES},
    state::AppState,
};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

/// Holds JWT signing and verification keys with config data.
///
/// Built once from `JwtConfig` at startup; verification depends only on the
/// token and these keys.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: TimeDuration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: TimeDuration::minutes(cfg.ttl_minutes.clamp(0, MAX_TTL_MINUTES)),
        }
    }

    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, TokenError> {
        self.issue_at(user_id, role, OffsetDateTime::now_utc())
    }

    fn issue_at(
        &self,
        user_id: Uuid,
        role: Role,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let exp = now
            .checked_add(self.ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.unix_timestamp().max(0) as usize,
            exp: exp.unix_timestamp().max(0) as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token =
            encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Signing)?;
        debug!(user_id = %user_id, %role, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(TokenError::Invalid)?;
        debug!(user_id = %data.claims.sub, role = %data.claims.role, "jwt verified");
        Ok(data.claims)
    }
}
