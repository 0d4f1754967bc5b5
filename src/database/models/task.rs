use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One to-do entry. `id` is unique across all owners; every read and
/// delete is scoped by `user_id`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
}

impl Task {
    /// Inserts a task for `user_id`. The description is trimmed first;
    /// whitespace-only input inserts nothing and returns `None`.
    pub async fn create(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        description: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let description = description.trim();
        if description.is_empty() {
            return Ok(None);
        }

        let result = sqlx::query("INSERT INTO tasks (user_id, description) VALUES (?, ?)")
            .bind(user_id)
            .bind(description)
            .execute(pool)
            .await?;

        Ok(Some(Task {
            id: result.last_insert_rowid(),
            user_id,
            description: description.to_string(),
        }))
    }

    /// The owner's tasks in insertion order.
    pub async fn find_by_owner(
        pool: &sqlx::SqlitePool,
        user_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, user_id, description FROM tasks WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Deletes the task only when both id and owner match. Returns whether
    /// a row was actually removed; a miss is not an error.
    pub async fn delete_for_owner(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
