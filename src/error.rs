use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::models::User;
use crate::views;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// A required form field is missing
    #[error("{0}")]
    Validation(String),

    /// Username already taken
    #[error("{0}")]
    Conflict(String),

    /// Bad username or password
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Forbidden")]
    Forbidden,
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::PasswordHash(_) | AppError::TaskJoin(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// Errors that are shown next to the form that caused them instead of
    /// replacing the page.
    pub fn is_form_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::Conflict(_) | AppError::Auth(_)
        )
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(None)
    }
}

impl AppError {
    /// Render the error page, with the nav reflecting `user`
    pub fn render(self, user: Option<&User>) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::PasswordHash(ref e) => {
                tracing::error!("Password hash error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::NotFound(msg) => msg,
            AppError::Forbidden => "You are not allowed to do that.".to_string(),
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::Auth(msg) => msg,
        };

        (status, Html(views::error_page(user, status, &error_message))).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
