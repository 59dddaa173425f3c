use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use crate::constants::{INDEX_PATH, LOGIN_PATH};
use crate::context::RequestContext;
use crate::flows::auth;
use crate::models::Credentials;
use crate::routes::form_error;
use crate::views;
use crate::AppState;

/// GET /auth/register
pub async fn register_form(ctx: RequestContext) -> Html<String> {
    Html(views::register_page(ctx.user.as_ref(), "", None))
}

/// POST /auth/register
///
/// Creates the account and sends the visitor to the login form. Missing
/// fields and taken usernames are reported on the form.
pub async fn register(
    State(state): State<AppState>,
    mut ctx: RequestContext,
    Form(form): Form<Credentials>,
) -> Response {
    match auth::register(&mut ctx.store, &form, state.config.password_hash_cost).await {
        Ok(_) => Redirect::to(LOGIN_PATH).into_response(),
        Err(err) => form_error(err, ctx.user.as_ref(), |message| {
            views::register_page(ctx.user.as_ref(), &form.username, Some(message))
        }),
    }
}

/// GET /auth/login
pub async fn login_form(ctx: RequestContext) -> Html<String> {
    Html(views::login_page(ctx.user.as_ref(), "", None))
}

/// POST /auth/login
///
/// Starts a session on success. Unknown usernames and wrong passwords get
/// distinct messages on the form, and no session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    mut ctx: RequestContext,
    Form(form): Form<Credentials>,
) -> Response {
    match auth::login(&mut ctx.store, &form).await {
        Ok(user) => {
            let jar = state.sessions.start(jar, user.id);
            (jar, Redirect::to(INDEX_PATH)).into_response()
        }
        Err(err) => form_error(err, ctx.user.as_ref(), |message| {
            views::login_page(ctx.user.as_ref(), &form.username, Some(message))
        }),
    }
}

/// GET /auth/logout
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = state.sessions.clear(jar);
    (jar, Redirect::to(INDEX_PATH))
}
