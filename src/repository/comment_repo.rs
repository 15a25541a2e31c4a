//! Comment repository

use super::LIST_LIMIT;
use crate::{auth::UserId, error::AppError, models::comment::*};
use sqlx::PgPool;

pub struct CommentRepository {
    db: PgPool,
}

impl CommentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        req: &CommentRequest,
        photo_id: i64,
        owner: UserId,
    ) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (message, user_id, photo_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&req.message)
        .bind(owner)
        .bind(photo_id)
        .fetch_one(&self.db)
        .await?;

        Ok(comment)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(comment)
    }

    pub async fn list(&self) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments ORDER BY created_at DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    pub async fn update(&self, id: i64, req: &CommentRequest) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET
                message = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.message)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
