//! Storage Layer
//!
//! SQLite persistence for toilet rows. The store owns identifier assignment.

mod config;
mod repository;

pub use config::StorageConfig;
pub use repository::ToiletStore;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
}
