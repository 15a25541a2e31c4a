//! User domain models

use crate::auth::{Owned, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// User account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user owns their own account record.
impl Owned for User {
    const KIND: &'static str = "User";

    fn owner_id(&self) -> UserId {
        self.id
    }
}

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,
    #[validate(
        email(message = "Invalid Email"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    /// 长度策略由配置决定，在 handler 中检查
    pub password: String,
    #[validate(range(min = 9, message = "Age should be at least 9 years old"))]
    pub age: i32,
}

impl RegisterRequest {
    pub fn prepare(self) -> Self {
        Self {
            username: super::trimmed(self.username),
            email: super::trimmed(self.email),
            ..self
        }
    }
}

/// Update user request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,
    #[validate(
        email(message = "Invalid Email"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    #[validate(range(min = 9, message = "Age should be at least 9 years old"))]
    pub age: i32,
}

impl UpdateUserRequest {
    pub fn prepare(self) -> Self {
        Self {
            username: super::trimmed(self.username),
            email: super::trimmed(self.email),
            ..self
        }
    }
}

/// User response (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A resource serialized together with its owner's public profile.
#[derive(Debug, Clone, Serialize)]
pub struct WithOwner<T> {
    #[serde(flatten)]
    pub item: T,
    pub user: UserResponse,
}

impl<T: Owned> WithOwner<T> {
    /// Pair each item with its owner. Items whose owner is not in `owners`
    /// are dropped.
    pub fn join(items: Vec<T>, owners: Vec<User>) -> Vec<Self> {
        let owners: HashMap<UserId, UserResponse> = owners
            .into_iter()
            .map(|user| (user.id, UserResponse::from(user)))
            .collect();

        items
            .into_iter()
            .filter_map(|item| {
                let user = owners.get(&item.owner_id())?.clone();
                Some(Self { item, user })
            })
            .collect()
    }
}
