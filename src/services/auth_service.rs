//! 认证服务：注册与登录

use crate::{
    auth::{AuthError, PasswordHasher, TokenService},
    error::AppError,
    models::{auth::*, user::*},
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
    password_min_length: usize,
}

impl AuthService {
    pub fn new(
        db: PgPool,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        password_min_length: usize,
    ) -> Self {
        Self {
            db,
            tokens,
            hasher,
            password_min_length,
        }
    }

    /// 检查密码长度策略
    pub fn check_password_policy(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.password_min_length {
            return Err(AppError::Validation(format!(
                "Password should be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }

    /// 注册：哈希在阻塞线程池上计算，明文不落库
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        self.check_password_policy(&req.password)?;

        let password_hash = self.hasher.hash_blocking(req.password.clone()).await?;

        let user = UserRepository::new(self.db.clone())
            .create(&req, &password_hash)
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// 用户登录
    ///
    /// 邮箱不存在与密码错误返回同一结果，且都完成一次哈希校验。
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = UserRepository::new(self.db.clone())
            .find_by_email(&req.email)
            .await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        match self.hasher.verify_blocking(req.password, stored_hash).await {
            Ok(()) => {}
            Err(AuthError::PasswordMismatch) => {
                tracing::info!("Login failed: invalid credentials");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        // verify_blocking 只在 hash 存在时返回 Ok
        let user = user.ok_or(AppError::InvalidCredentials)?;

        let token = self.tokens.create_token(user.id)?;

        tracing::info!(user_id = user.id, "Login succeeded");

        Ok(LoginResponse {
            token,
            token_type: "Bearer",
            expires_in: self.tokens.ttl_secs(),
            user: UserResponse::from(user),
        })
    }
}
