use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::tasks::repo_types::TaskChanges;
use crate::validation::{Checks, Validate};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
}

impl Validate for CreateTaskRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::default()
            .non_blank(&self.title, "title", "Title is required")
            .non_blank(&self.description, "description", "Description is required")
            .finish()
    }
}

/// Self-service partial update. Unknown keys (including any owner field)
/// are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl Validate for UpdateTaskRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::default()
            .non_blank_if_set(self.title.as_deref(), "title", "Title cannot be empty")
            .non_blank_if_set(
                self.description.as_deref(),
                "description",
                "Description cannot be empty",
            )
            .finish()
    }
}

impl From<UpdateTaskRequest> for TaskChanges {
    fn from(r: UpdateTaskRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            completed: r.completed,
            user_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_field_cannot_sneak_into_self_service_update() {
        let req: UpdateTaskRequest = serde_json::from_str(
            r#"{"completed":true,"userId":"6f1d1c1e-7d64-4a8c-9a53-0a4b8d7c2f10"}"#,
        )
        .unwrap();
        let changes = TaskChanges::from(req);
        assert_eq!(changes.completed, Some(true));
        assert_eq!(changes.user_id, None);
        assert_eq!(changes.title, None);
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdateTaskRequest::default().validate().is_ok());
    }

    #[test]
    fn blank_title_in_update_is_rejected() {
        let req = UpdateTaskRequest {
            title: Some("".into()),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap_err()[0].field, "title");
    }

    #[test]
    fn create_requires_both_fields() {
        let req = CreateTaskRequest {
            title: "T".into(),
            description: "  ".into(),
        };
        assert_eq!(req.validate().unwrap_err()[0].field, "description");
    }
}
