use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{StoreError, StoreResult, TaskRepo};
use crate::tasks::repo_types::{NewTask, Task, TaskChanges, TaskWithOwner, TaskWithOwnerRow};

/// Postgres-backed `TaskRepo`.
#[derive(Clone)]
pub struct PgTaskRepo {
    db: PgPool,
}

impl PgTaskRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepo for PgTaskRepo {
    async fn create(&self, new: NewTask) -> StoreResult<Task> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed, user_id, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            // owner deleted between the existence check and the insert
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::MissingOwner
            }
            other => StoreError::Database(other),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, user_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(task)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, completed, user_id, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn list_with_owner(&self) -> StoreResult<Vec<TaskWithOwner>> {
        let rows = sqlx::query_as::<_, TaskWithOwnerRow>(
            r#"
            SELECT t.id, t.title, t.description, t.completed, t.user_id,
                   t.created_at, t.updated_at,
                   u.name  AS owner_name,
                   u.email AS owner_email
              FROM tasks t
              JOIN users u ON u.id = t.user_id
             ORDER BY t.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(TaskWithOwner::from).collect())
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> StoreResult<Option<Task>> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
               SET title       = COALESCE($2, title),
                   description = COALESCE($3, description),
                   completed   = COALESCE($4, completed),
                   user_id     = COALESCE($5, user_id),
                   updated_at  = now()
             WHERE id = $1
            RETURNING id, title, description, completed, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.completed)
        .bind(changes.user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::MissingOwner
            }
            other => StoreError::Database(other),
        })
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let res = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
