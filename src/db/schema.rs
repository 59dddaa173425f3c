use sqlx::SqlitePool;

/// `user` and `post` tables, created only when missing
const CREATE_TABLES: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS user (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS post (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        author_id INTEGER NOT NULL,
        created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        FOREIGN KEY (author_id) REFERENCES user (id)
    )
    "#,
];

/// `post` references `user`, so it goes first
const DROP_TABLES: [&str; 2] = ["DROP TABLE IF EXISTS post", "DROP TABLE IF EXISTS user"];

/// Create any missing tables, leaving existing data alone
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!("Database schema ready");
    Ok(())
}

/// Drop both tables and recreate them empty
///
/// Destructive: every user and post is lost.
pub async fn reset_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in DROP_TABLES.into_iter().chain(CREATE_TABLES) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::warn!("Database schema reset, all users and posts removed");
    Ok(())
}
