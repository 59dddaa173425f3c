//! Request-handling operations, independent of HTTP
//!
//! Each operation takes the request's store (and the current user where it
//! matters) explicitly and reports failures as [`AppError`](crate::AppError)s
//! that the route handlers turn into pages.

pub mod auth;
pub mod posts;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use crate::db::{ensure_schema, Store};

    /// Cheapest cost bcrypt accepts
    pub const TEST_HASH_COST: u32 = 4;

    /// Single-connection in-memory database with the schema applied
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_schema(&pool).await.unwrap();
        pool
    }

    pub async fn memory_store() -> Store {
        Store::acquire(&memory_pool().await).await.unwrap()
    }
}
