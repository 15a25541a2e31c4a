//! Social media link models

use crate::auth::{Owned, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user's social media link
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SocialMedia {
    pub id: i64,
    pub name: String,
    #[serde(rename = "socialMediaURL")]
    pub social_media_url: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for SocialMedia {
    const KIND: &'static str = "Social media";

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Create / update social media request
#[derive(Debug, Deserialize, Validate)]
pub struct SocialMediaRequest {
    #[validate(length(min = 1, max = 255, message = "Required Name"))]
    pub name: String,
    #[serde(rename = "socialMediaURL")]
    #[validate(length(min = 1, message = "Required Social Media URL"))]
    pub social_media_url: String,
}

impl SocialMediaRequest {
    pub fn prepare(self) -> Self {
        Self {
            name: super::trimmed(self.name),
            social_media_url: super::trimmed(self.social_media_url),
        }
    }
}
