use axum::{
    extract::{rejection::FormRejection, rejection::PathRejection, Path},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::constants::INDEX_PATH;
use crate::context::RequestContext;
use crate::error::{AppError, Result};
use crate::flows::posts;
use crate::models::PostForm;
use crate::routes::form_error;
use crate::views;

// Path and body are taken as `Result`s so that the login guard runs before
// either can reject the request.
type PostId = std::result::Result<Path<i64>, PathRejection>;
type PostBody = std::result::Result<Form<PostForm>, FormRejection>;

/// Only integer ids route to a post
fn post_id(path: PostId) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected post id: {}", rejection);
        AppError::NotFound("The requested URL was not found on the server.".to_string())
    })
}

/// GET /
pub async fn index(mut ctx: RequestContext) -> Result<Html<String>> {
    let posts = posts::list(&mut ctx.store).await?;
    Ok(Html(views::index_page(ctx.user.as_ref(), &posts)))
}

/// GET /create
pub async fn create_form(mut ctx: RequestContext) -> Response {
    let (_, user) = match ctx.require_login() {
        Ok(parts) => parts,
        Err(redirect) => return redirect.into_response(),
    };

    Html(views::create_page(user, &PostForm::default(), None)).into_response()
}

/// POST /create
pub async fn create(mut ctx: RequestContext, body: PostBody) -> Response {
    let (store, user) = match ctx.require_login() {
        Ok(parts) => parts,
        Err(redirect) => return redirect.into_response(),
    };
    let Form(form) = match body {
        Ok(form) => form,
        Err(rejection) => return rejection.into_response(),
    };

    match posts::create(store, user, &form).await {
        Ok(_) => Redirect::to(INDEX_PATH).into_response(),
        Err(err) => form_error(err, Some(user), |message| {
            views::create_page(user, &form, Some(message))
        }),
    }
}

/// GET /:id/update
pub async fn update_form(mut ctx: RequestContext, path: PostId) -> Response {
    let (store, user) = match ctx.require_login() {
        Ok(parts) => parts,
        Err(redirect) => return redirect.into_response(),
    };

    let listing = match post_id(path) {
        Ok(id) => posts::get_for_edit(store, user, id).await,
        Err(err) => Err(err),
    };

    match listing {
        Ok(listing) => {
            let id = listing.post.id;
            let form = PostForm {
                title: listing.post.title,
                body: listing.post.body,
            };
            Html(views::update_page(user, id, &form, None)).into_response()
        }
        Err(err) => err.render(Some(user)),
    }
}

/// POST /:id/update
pub async fn update(mut ctx: RequestContext, path: PostId, body: PostBody) -> Response {
    let (store, user) = match ctx.require_login() {
        Ok(parts) => parts,
        Err(redirect) => return redirect.into_response(),
    };
    let id = match post_id(path) {
        Ok(id) => id,
        Err(err) => return err.render(Some(user)),
    };
    let Form(form) = match body {
        Ok(form) => form,
        Err(rejection) => return rejection.into_response(),
    };

    match posts::update(store, user, id, &form).await {
        Ok(()) => Redirect::to(INDEX_PATH).into_response(),
        Err(err) => form_error(err, Some(user), |message| {
            views::update_page(user, id, &form, Some(message))
        }),
    }
}

/// POST /:id/delete
pub async fn delete(mut ctx: RequestContext, path: PostId) -> Response {
    let (store, user) = match ctx.require_login() {
        Ok(parts) => parts,
        Err(redirect) => return redirect.into_response(),
    };

    let result = match post_id(path) {
        Ok(id) => posts::delete(store, user, id).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => Redirect::to(INDEX_PATH).into_response(),
        Err(err) => err.render(Some(user)),
    }
}
