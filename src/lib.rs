//! Blog Server Library
//!
//! A small multi-user blog: accounts, signed-cookie sessions, and posts that
//! only their authors may edit or delete.

pub mod config;
pub mod constants;
pub mod context;
pub mod db;
pub mod error;
pub mod flows;
pub mod models;
pub mod routes;
pub mod security;
pub mod session;
pub mod views;

pub use config::Config;
pub use context::RequestContext;
pub use error::{AppError, Result};

use hmac::digest::InvalidLength;
use session::SessionManager;
use sqlx::SqlitePool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub sessions: SessionManager,
}

impl AppState {
    /// Create a new AppState with the given pool and configuration
    pub fn new(pool: SqlitePool, config: Config) -> std::result::Result<Self, InvalidLength> {
        let sessions = SessionManager::new(&config)?;
        Ok(Self {
            pool,
            config,
            sessions,
        })
    }
}
