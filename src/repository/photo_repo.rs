//! Photo repository

use super::LIST_LIMIT;
use crate::{auth::UserId, error::AppError, models::photo::*};
use sqlx::PgPool;

pub struct PhotoRepository {
    db: PgPool,
}

impl PhotoRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建照片，属主取自认证上下文
    pub async fn create(&self, req: &CreatePhotoRequest, owner: UserId) -> Result<Photo, AppError> {
        sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (title, caption, photo_url, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.caption)
        .bind(&req.photo_url)
        .bind(owner)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::unique_or(e, "Title already taken"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Photo>, AppError> {
        let photo = sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(photo)
    }

    /// 最新的照片在前
    pub async fn list(&self) -> Result<Vec<Photo>, AppError> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos ORDER BY created_at DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(photos)
    }

    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Photo>, AppError> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(photos)
    }

    /// 更新标题与描述；user_id 不在可更新列中
    pub async fn update(&self, id: i64, req: &UpdatePhotoRequest) -> Result<Option<Photo>, AppError> {
        sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET
                title = $2,
                caption = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.caption)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::unique_or(e, "Title already taken"))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
