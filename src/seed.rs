//! 演示数据
//! 通过 `--seed` 启动参数写入，重复执行不会产生重复用户

use crate::{auth::PasswordHasher, db::DbError};
use sqlx::PgPool;
use std::sync::Arc;

struct SeedUser {
    username: &'static str,
    email: &'static str,
    age: i32,
}

const SEED_PASSWORD: &str = "password";

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        username: "admin",
        email: "admin@gmail.com",
        age: 17,
    },
    SeedUser {
        username: "udin",
        email: "udin@gmail.com",
        age: 19,
    },
    SeedUser {
        username: "rizal",
        email: "rizal@gmail.com",
        age: 13,
    },
];

/// 写入演示用户，返回新插入的行数
pub async fn seed_users(pool: &PgPool, hasher: &Arc<PasswordHasher>) -> Result<u64, DbError> {
    let mut inserted = 0;

    for user in SEED_USERS {
        let password_hash = hasher
            .hash_blocking(SEED_PASSWORD.to_string())
            .await
            .map_err(|e| DbError::SeedFailed(e.to_string()))?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, age)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(&password_hash)
        .bind(user.age)
        .execute(pool)
        .await
        .map_err(|e| DbError::SeedFailed(e.to_string()))?;

        inserted += result.rows_affected();
    }

    tracing::info!(inserted, "Seed users loaded");
    Ok(inserted)
}
