//! Social media repository

use super::LIST_LIMIT;
use crate::{auth::UserId, error::AppError, models::social_media::*};
use sqlx::PgPool;

pub struct SocialMediaRepository {
    db: PgPool,
}

impl SocialMediaRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: &SocialMediaRequest, owner: UserId) -> Result<SocialMedia, AppError> {
        sqlx::query_as::<_, SocialMedia>(
            r#"
            INSERT INTO social_medias (name, social_media_url, user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.social_media_url)
        .bind(owner)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::unique_or(e, "Name already taken"))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SocialMedia>, AppError> {
        let entry = sqlx::query_as::<_, SocialMedia>("SELECT * FROM social_medias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(entry)
    }

    pub async fn list(&self) -> Result<Vec<SocialMedia>, AppError> {
        let entries = sqlx::query_as::<_, SocialMedia>(
            "SELECT * FROM social_medias ORDER BY created_at DESC LIMIT $1",
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<SocialMedia>, AppError> {
        let entries = sqlx::query_as::<_, SocialMedia>(
            "SELECT * FROM social_medias WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    pub async fn update(
        &self,
        id: i64,
        req: &SocialMediaRequest,
    ) -> Result<Option<SocialMedia>, AppError> {
        sqlx::query_as::<_, SocialMedia>(
            r#"
            UPDATE social_medias
            SET
                name = $2,
                social_media_url = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.social_media_url)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::unique_or(e, "Name already taken"))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM social_medias WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
