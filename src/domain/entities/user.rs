use serde::Deserialize;
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;
use crate::entities::form_fields::blank_as_none;


#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub username: String,
    pub password_hash: String,
}

/// Admin account seeded from configuration at startup.
#[derive(Debug, Deserialize, Validate)]
pub struct NewAdmin {
    #[validate(length(min = 3, max = 60, message = "Username must be 3-60 characters"))]
    pub username: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

impl NewAdmin {
    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        UserInsert {
            username: self.username.trim().to_string(),
            password_hash,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,

    /// Admin path to return to after a successful form login.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub next: Option<String>,
}
