use axum::{async_trait, extract::FromRequest, extract::Request};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{AppError, FieldError};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Request bodies that check themselves after deserializing.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Collects field failures for a single `Validate` impl.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn require(&mut self, ok: bool, field: &'static str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn non_blank(&mut self, value: &str, field: &'static str, message: &str) -> &mut Self {
        self.require(!value.trim().is_empty(), field, message)
    }

    /// Like `non_blank`, but an absent value passes.
    pub fn non_blank_if_set(
        &mut self,
        value: Option<&str>,
        field: &'static str,
        message: &str,
    ) -> &mut Self {
        match value {
            Some(v) => self.non_blank(v, field, message),
            None => self,
        }
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

/// `Json<T>` that maps rejections and `Validate` failures onto `AppError`.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        value.validate().map_err(AppError::Validation)?;
        Ok(ValidJson(value))
    }
}

/// `Path<T>` whose rejection (e.g. a malformed UUID) uses the error envelope.
#[derive(axum::extract::FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
