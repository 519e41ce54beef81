use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Task record in the database.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: Uuid, // owner
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<Uuid>,
}

/// Reduced owner view attached to admin task listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskWithOwner {
    #[serde(flatten)]
    pub task: Task,
    pub user: OwnerSummary,
}

/// Flat row produced by the tasks/users join.
#[derive(Debug, FromRow)]
pub struct TaskWithOwnerRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub owner_name: String,
    pub owner_email: String,
}

impl From<TaskWithOwnerRow> for TaskWithOwner {
    fn from(r: TaskWithOwnerRow) -> Self {
        Self {
            user: OwnerSummary {
                id: r.user_id,
                name: r.owner_name,
                email: r.owner_email,
            },
            task: Task {
                id: r.id,
                title: r.title,
                description: r.description,
                completed: r.completed,
                user_id: r.user_id,
                created_at: r.created_at,
                updated_at: r.updated_at,
            },
        }
    }
}
