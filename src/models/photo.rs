//! Photo domain models

use crate::auth::{Owned, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Photo post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Photo {
    const KIND: &'static str = "Photo";

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Create photo request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    #[validate(length(min = 1, max = 255, message = "Required Title"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Required Caption"))]
    pub caption: String,
    #[validate(length(min = 1, max = 255, message = "Required Photo URL"))]
    pub photo_url: String,
}

impl CreatePhotoRequest {
    pub fn prepare(self) -> Self {
        Self {
            title: super::trimmed(self.title),
            caption: super::trimmed(self.caption),
            photo_url: super::trimmed(self.photo_url),
        }
    }
}

/// Update photo request (the URL and owner are fixed after creation)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePhotoRequest {
    #[validate(length(min = 1, max = 255, message = "Required Title"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Required Caption"))]
    pub caption: String,
}

impl UpdatePhotoRequest {
    pub fn prepare(self) -> Self {
        Self {
            title: super::trimmed(self.title),
            caption: super::trimmed(self.caption),
        }
    }
}
