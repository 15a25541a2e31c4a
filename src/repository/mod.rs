//! Database repository layer

pub mod comment_repo;
pub mod photo_repo;
pub mod social_media_repo;
pub mod user_repo;

pub use comment_repo::*;
pub use photo_repo::*;
pub use social_media_repo::*;
pub use user_repo::*;

/// 列表查询的统一上限
pub const LIST_LIMIT: i64 = 100;
