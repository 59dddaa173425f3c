use crate::constants::{ERR_INCORRECT_PASSWORD, ERR_INCORRECT_USERNAME};
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::{Credentials, User};
use crate::security::{hash_password, verify_password};

/// Create an account and return its id
///
/// Fails with `Validation` naming the first missing field, or `Conflict` if
/// the username is taken.
pub async fn register(store: &mut Store, form: &Credentials, hash_cost: u32) -> Result<i64> {
    form.validate().map_err(|msg| AppError::Validation(msg.to_string()))?;

    // bcrypt holds the thread for the whole hash
    let password = form.password.clone();
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password(&password, hash_cost)).await??;
    let user_id = store.insert_user(&form.username, &password_hash).await?;

    tracing::info!("New user registered: id {}", user_id);
    Ok(user_id)
}

/// Check credentials and return the matching user
pub async fn login(store: &mut Store, form: &Credentials) -> Result<User> {
    let Some(user) = store.find_user_by_name(&form.username).await? else {
        tracing::info!("Login failed: unknown username");
        return Err(AppError::Auth(ERR_INCORRECT_USERNAME.to_string()));
    };

    let password = form.password.clone();
    let digest = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &digest)).await?;

    if !matches {
        tracing::info!("Login failed: wrong password for user {}", user.id);
        return Err(AppError::Auth(ERR_INCORRECT_PASSWORD.to_string()));
    }

    tracing::info!("User {} logged in", user.id);
    Ok(user)
}

/// Resolve the user a session points at
///
/// A session naming a user that no longer exists counts as anonymous.
pub async fn load_current_user(store: &mut Store, user_id: Option<i64>) -> Result<Option<User>> {
    match user_id {
        Some(id) => store.find_user_by_id(id).await,
        None => Ok(None),
    }
}
