//! Comment domain models

use crate::auth::{Owned, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Comment on a photo
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub message: String,
    pub user_id: UserId,
    pub photo_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Comment {
    const KIND: &'static str = "Comment";

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Create / update comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 255, message = "Required Message"))]
    pub message: String,
}

impl CommentRequest {
    pub fn prepare(self) -> Self {
        Self {
            message: super::trimmed(self.message),
        }
    }
}
