//! PostgreSQL 访问基础设施
//! 连接池、内嵌迁移与连通性探测

use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// 数据库错误类型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Seeding failed: {0}")]
    SeedFailed(String),
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    let secs = Duration::from_secs;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(secs(config.acquire_timeout_secs))
        .idle_timeout(secs(config.idle_timeout_secs))
        .max_lifetime(secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// 建立连接池，启动时即连接数据库
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = pool_options(config)
        .connect(config.url.expose_secret())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Database unreachable at startup");
            DbError::ConnectionFailed(e.to_string())
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database pool ready"
    );
    Ok(pool)
}

/// 延迟连接：只校验 URL，首次查询时才建立连接
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    pool_options(config)
        .min_connections(0)
        .connect_lazy(config.url.expose_secret())
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))
}

/// 应用 migrations/ 下的内嵌迁移
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        tracing::error!(error = %e, "Schema migration failed");
        DbError::MigrationFailed(e.to_string())
    })?;

    tracing::info!("Schema up to date");
    Ok(())
}

/// 连通性探测；失败原因只写日志
pub async fn ping(pool: &PgPool) -> bool {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            false
        }
    }
}

/// 连接池规模指标
pub fn record_pool_metrics(pool: &PgPool) {
    metrics::gauge!("db.pool.size").set(pool.size() as f64);
    metrics::gauge!("db.pool.idle").set(pool.num_idle() as f64);
}
