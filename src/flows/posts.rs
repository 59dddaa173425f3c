use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{PostForm, PostListing, User};

/// Every post, newest first, with its author's username
pub async fn list(store: &mut Store) -> Result<Vec<PostListing>> {
    store.list_posts().await
}

/// Publish a post as `author` and return its id
pub async fn create(store: &mut Store, author: &User, form: &PostForm) -> Result<i64> {
    form.validate().map_err(|msg| AppError::Validation(msg.to_string()))?;

    let post_id = store.insert_post(author.id, &form.title, &form.body).await?;

    tracing::info!("User {} created post {}", author.id, post_id);
    Ok(post_id)
}

/// Load a post for its author
///
/// `NotFound` if the post does not exist, `Forbidden` if `user` did not
/// write it. Every mutation goes through here first.
pub async fn get_for_edit(store: &mut Store, user: &User, post_id: i64) -> Result<PostListing> {
    let post = store
        .find_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post id {} doesn't exist.", post_id)))?;

    if post.post.author_id != user.id {
        tracing::warn!(
            "User {} attempted to modify post {} owned by user {}",
            user.id,
            post_id,
            post.post.author_id
        );
        return Err(AppError::Forbidden);
    }

    Ok(post)
}

pub async fn update(store: &mut Store, user: &User, post_id: i64, form: &PostForm) -> Result<()> {
    get_for_edit(store, user, post_id).await?;
    form.validate().map_err(|msg| AppError::Validation(msg.to_string()))?;

    store.update_post(post_id, &form.title, &form.body).await?;

    tracing::info!("User {} updated post {}", user.id, post_id);
    Ok(())
}

pub async fn delete(store: &mut Store, user: &User, post_id: i64) -> Result<()> {
    get_for_edit(store, user, post_id).await?;
    store.delete_post(post_id).await?;

    tracing::info!("User {} deleted post {}", user.id, post_id);
    Ok(())
}
