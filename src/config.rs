//! 配置系统
//! 默认值 + MYGRAM_ 前缀环境变量，各配置段自行校验，敏感值使用 Secret 包装

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::ops::RangeInclusive;

/// 令牌有效期范围：1 分钟到 24 小时
const TOKEN_TTL_RANGE: RangeInclusive<u64> = 60..=86400;
const PASSWORD_MIN_LENGTH_RANGE: RangeInclusive<usize> = 6..=128;
const MIN_SECRET_LEN: usize = 32;

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Message(msg.into())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:8080"
    pub addr: String,
    /// 请求体大小上限（字节）
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let port = self
            .addr
            .rsplit_once(':')
            .and_then(|(_, port)| port.parse::<u16>().ok());
        // 0 表示随机端口
        if matches!(port, Some(p) if p != 0 && p < 1024) {
            return Err(invalid("Server port should be >= 1024"));
        }
        if self.body_limit_bytes == 0 {
            return Err(invalid("body_limit_bytes must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库连接 URL（使用 Secret 包装，防止日志泄露）
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    /// 获取连接超时时间（秒）
    pub acquire_timeout_secs: u64,
    /// 空闲连接超时时间（秒）
    pub idle_timeout_secs: u64,
    /// 连接最大生命周期（秒）
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 || self.max_connections < self.min_connections {
            return Err(invalid(
                "max_connections must be non-zero and >= min_connections",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

impl LoggingConfig {
    const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
    const FORMATS: [&'static str; 2] = ["json", "pretty"];

    fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !Self::LEVELS.contains(&level.as_str()) {
            return Err(invalid(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.level,
                Self::LEVELS.join(", ")
            )));
        }

        let format = self.format.to_lowercase();
        if !Self::FORMATS.contains(&format.as_str()) {
            return Err(invalid(format!(
                "Invalid log format: {}. Must be one of: {}",
                self.format,
                Self::FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（使用 Secret 包装，防止日志泄露）
    pub jwt_secret: Secret<String>,
    /// 令牌有效期（秒）
    pub token_ttl_secs: u64,
    pub password_min_length: usize,
    /// Argon2 内存开销（KiB）
    pub hash_memory_kib: u32,
    /// Argon2 迭代次数
    pub hash_iterations: u32,
    /// Argon2 并行度
    pub hash_parallelism: u32,
}

impl SecurityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(invalid(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }
        if !TOKEN_TTL_RANGE.contains(&self.token_ttl_secs) {
            return Err(invalid(format!(
                "token_ttl_secs must be between {} and {}",
                TOKEN_TTL_RANGE.start(),
                TOKEN_TTL_RANGE.end()
            )));
        }
        if !PASSWORD_MIN_LENGTH_RANGE.contains(&self.password_min_length) {
            return Err(invalid(format!(
                "password_min_length must be between {} and {}",
                PASSWORD_MIN_LENGTH_RANGE.start(),
                PASSWORD_MIN_LENGTH_RANGE.end()
            )));
        }
        if [self.hash_memory_kib, self.hash_iterations, self.hash_parallelism].contains(&0) {
            return Err(invalid(
                "hash_memory_kib, hash_iterations and hash_parallelism must be non-zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置，例如 MYGRAM_SECURITY__JWT_SECRET
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            // server
            .set_default("server.addr", "0.0.0.0:8080")?
            .set_default("server.body_limit_bytes", 1024 * 1024)?
            // database（url 无默认值，必须提供）
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("database.max_lifetime_secs", 1800)?
            // logging
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // security（jwt_secret 无默认值，必须提供）
            .set_default("security.token_ttl_secs", 3600)?
            .set_default("security.password_min_length", 6)?
            .set_default("security.hash_memory_kib", 65536)?
            .set_default("security.hash_iterations", 3)?
            .set_default("security.hash_parallelism", 4)?
            .add_source(
                Environment::with_prefix("MYGRAM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// 逐段校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        self.security.validate()
    }
}
