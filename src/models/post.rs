use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::constants::ERR_TITLE_REQUIRED;

/// Blog post, as stored in the `post` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    /// Set by the database on insert (UTC)
    #[sqlx(rename = "created")]
    pub created_at: NaiveDateTime,
}

/// Post joined with its author's username
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostListing {
    #[sqlx(flatten)]
    pub post: Post,
    pub username: String,
}

/// Title/body submitted by the create and update forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() {
            return Err(ERR_TITLE_REQUIRED);
        }
        Ok(())
    }
}
