//! User repository (数据库访问层)

use crate::{
    auth::{Owned, UserId},
    error::AppError,
    models::user::*,
};
use sqlx::PgPool;

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 根据邮箱查找用户
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 根据 ID 查找用户
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    /// 创建用户（只接收哈希，不接收明文密码）
    pub async fn create(&self, req: &RegisterRequest, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, age)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .bind(password_hash)
        .bind(req.age)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::unique_or(e, "Username or email already taken"))
    }

    /// 更新用户资料
    pub async fn update(&self, id: UserId, req: &UpdateUserRequest) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                username = $2,
                email = $3,
                age = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.username)
        .bind(&req.email)
        .bind(req.age)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::unique_or(e, "Username or email already taken"))
    }

    /// 删除用户，照片、评论、社交账号随外键级联删除
    pub async fn delete(&self, id: UserId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(&self, id: UserId) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.db)
            .await?;

        Ok(exists)
    }

    /// 为资源附加属主资料（一次查询取回全部属主）
    pub async fn attach_owners<T: Owned>(&self, items: Vec<T>) -> Result<Vec<WithOwner<T>>, AppError> {
        let mut ids: Vec<UserId> = items.iter().map(Owned::owner_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let owners = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.db)
            .await?;

        Ok(WithOwner::join(items, owners))
    }

    pub async fn attach_owner<T: Owned>(&self, item: T) -> Result<WithOwner<T>, AppError> {
        let user = self
            .find_by_id(item.owner_id())
            .await?
            .ok_or_else(|| AppError::not_found(User::KIND))?;

        Ok(WithOwner {
            item,
            user: UserResponse::from(user),
        })
    }
}
