//! Error types for the jobtrail library
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized for a frontend surface.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Profile not found for user: {0}")]
    ProfileNotFound(String),

    #[error("Job application not found: {0}")]
    JobNotFound(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    // Spelled out fully: the crate's own one-parameter `Result` alias is in
    // scope here and would otherwise shadow this signature.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
