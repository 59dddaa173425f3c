pub mod pool;
pub mod schema;
pub mod store;

pub use pool::create_pool;
pub use schema::{ensure_schema, reset_schema};
pub use store::Store;
