pub mod auth;
pub mod blog;
pub mod health;

use axum::{
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::User;
use crate::session::expire_stale_session;
use crate::AppState;

pub use auth::{login, login_form, logout, register, register_form};
pub use blog::{create, create_form, delete, index, update, update_form};
pub use health::health_check;

/// Build the application router
pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout));

    Router::new()
        .route("/", get(index))
        .route("/hello", get(hello))
        .route("/health", get(health_check))
        .route("/create", get(create_form).post(create))
        .route("/:id/update", get(update_form).post(update))
        .route("/:id/delete", post(delete))
        .nest("/auth", auth_routes)
        .layer(middleware::from_fn(expire_stale_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Static greeting
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// Re-render the originating form for user-facing errors, the error page
/// for everything else
fn form_error(
    err: AppError,
    user: Option<&User>,
    render: impl FnOnce(&str) -> String,
) -> Response {
    if !err.is_form_error() {
        return err.render(user);
    }

    let status = err.status_code();
    let message = err.to_string();
    (status, Html(render(&message))).into_response()
}
