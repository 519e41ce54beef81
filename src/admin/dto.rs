use serde::Deserialize;
use uuid::Uuid;

use crate::auth::repo_types::Role;
use crate::error::FieldError;
use crate::tasks::{dto::UpdateTaskRequest, repo_types::TaskChanges};
use crate::validation::{Checks, Validate};

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

impl Validate for ChangeRoleRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        // the closed enum already rejected anything but USER/ADMIN
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskRequest {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

impl Validate for AssignTaskRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::default()
            .non_blank(&self.title, "title", "Title is required")
            .non_blank(&self.description, "description", "Description is required")
            .finish()
    }
}

/// Admin partial update; unlike the self-service one it may move the task
/// to another owner.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateTaskRequest {
    #[serde(flatten)]
    pub fields: UpdateTaskRequest,
    pub user_id: Option<Uuid>,
}

impl Validate for AdminUpdateTaskRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        self.fields.validate()
    }
}

impl From<AdminUpdateTaskRequest> for TaskChanges {
    fn from(r: AdminUpdateTaskRequest) -> Self {
        Self {
            user_id: r.user_id,
            ..TaskChanges::from(r.fields)
        }
    }
}
