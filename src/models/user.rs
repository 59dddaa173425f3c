use serde::Deserialize;

use crate::constants::{ERR_PASSWORD_REQUIRED, ERR_USERNAME_REQUIRED};

/// Registered account, as stored in the `user` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Unique, case-sensitive
    pub username: String,
    /// bcrypt digest, never the raw password
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Username/password pair submitted by the register and login forms
///
/// Missing fields deserialize as empty strings so they surface as validation
/// errors instead of extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// First unmet requirement, if any
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.is_empty() {
            return Err(ERR_USERNAME_REQUIRED);
        }
        if self.password.is_empty() {
            return Err(ERR_PASSWORD_REQUIRED);
        }
        Ok(())
    }
}
