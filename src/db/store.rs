use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};

use crate::error::{AppError, Result};
use crate::models::{PostListing, User};

const SELECT_POST_LISTING: &str = r#"
    SELECT p.id, p.author_id, p.created, p.title, p.body, u.username
    FROM post p JOIN user u ON p.author_id = u.id
"#;

/// Request-scoped handle on the database
///
/// Holds one pooled connection for the lifetime of a request. The connection
/// goes back to the pool when the `Store` is dropped, whichever way the
/// handler exits. Each write is a single autocommitted statement.
pub struct Store {
    conn: PoolConnection<Sqlite>,
}

impl Store {
    /// Take a connection from the pool
    pub async fn acquire(pool: &SqlitePool) -> Result<Self> {
        let conn = pool.acquire().await?;
        Ok(Self { conn })
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn find_user_by_name(&mut self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM user WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    pub async fn find_user_by_id(&mut self, id: i64) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, username, password FROM user WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *self.conn)
                .await?;

        Ok(user)
    }

    /// Insert a user and return its id
    ///
    /// Fails with [`AppError::Conflict`] if the username is taken; the unique
    /// constraint decides, so concurrent registrations cannot both succeed.
    pub async fn insert_user(&mut self, username: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query("INSERT INTO user (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&mut *self.conn)
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("User {} is already registered.", username)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// All posts with their author, newest first
    pub async fn list_posts(&mut self) -> Result<Vec<PostListing>> {
        let query = format!("{SELECT_POST_LISTING} ORDER BY p.created DESC, p.id DESC");
        let posts = sqlx::query_as::<_, PostListing>(&query)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(posts)
    }

    pub async fn find_post(&mut self, id: i64) -> Result<Option<PostListing>> {
        let query = format!("{SELECT_POST_LISTING} WHERE p.id = ?");
        let post = sqlx::query_as::<_, PostListing>(&query)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(post)
    }

    pub async fn insert_post(&mut self, author_id: i64, title: &str, body: &str) -> Result<i64> {
        let done = sqlx::query("INSERT INTO post (author_id, title, body) VALUES (?, ?, ?)")
            .bind(author_id)
            .bind(title)
            .bind(body)
            .execute(&mut *self.conn)
            .await?;

        Ok(done.last_insert_rowid())
    }

    pub async fn update_post(&mut self, id: i64, title: &str, body: &str) -> Result<()> {
        sqlx::query("UPDATE post SET title = ?, body = ? WHERE id = ?")
            .bind(title)
            .bind(body)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }

    pub async fn delete_post(&mut self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM post WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_store() -> (SqlitePool, Store) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        let store = Store::acquire(&pool).await.unwrap();
        (pool, store)
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let (_pool, mut store) = test_store().await;

        let id = store.insert_user("alice", "digest").await.unwrap();

        let by_name = store.find_user_by_name("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.password_hash, "digest");

        let by_id = store.find_user_by_id(id).await.unwrap().unwrap();
        assert_eq!(by_id, by_name);

        assert!(store.find_user_by_name("bob").await.unwrap().is_none());
        assert!(store.find_user_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let (_pool, mut store) = test_store().await;

        store.insert_user("alice", "x").await.unwrap();
        store.insert_user("Alice", "y").await.unwrap();

        assert!(store.find_user_by_name("ALICE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_user_conflicts() {
        let (_pool, mut store) = test_store().await;

        store.insert_user("alice", "x").await.unwrap();
        let err = store.insert_user("alice", "y").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref msg) if msg == "User alice is already registered."));
    }

    #[tokio::test]
    async fn test_post_crud() {
        let (_pool, mut store) = test_store().await;
        let author = store.insert_user("alice", "x").await.unwrap();

        let id = store.insert_post(author, "Hi", "body").await.unwrap();
        let listing = store.find_post(id).await.unwrap().unwrap();
        assert_eq!(listing.post.author_id, author);
        assert_eq!(listing.post.title, "Hi");
        assert_eq!(listing.username, "alice");

        store.update_post(id, "Hello", "").await.unwrap();
        let updated = store.find_post(id).await.unwrap().unwrap();
        assert_eq!(updated.post.title, "Hello");
        assert_eq!(updated.post.body, "");
        assert_eq!(updated.post.created_at, listing.post.created_at);

        store.delete_post(id).await.unwrap();
        assert!(store.find_post(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_posts_newest_first() {
        let (_pool, mut store) = test_store().await;
        let author = store.insert_user("alice", "x").await.unwrap();

        let first = store.insert_post(author, "first", "").await.unwrap();
        let second = store.insert_post(author, "second", "").await.unwrap();

        let posts = store.list_posts().await.unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.post.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let (_pool, mut store) = test_store().await;

        let err = store.insert_post(99, "orphan", "").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
