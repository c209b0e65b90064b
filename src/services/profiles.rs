//! Profiles service
//!
//! Per-user profile settings: display name, theme preference, and the
//! user-defined job table columns.

use crate::config::{MAX_CUSTOM_COLUMNS, VALID_THEMES};
use crate::database::{Profile, Repository, UpdateProfileRequest};
use crate::error::{AppError, Result};

/// Service for managing profiles
#[derive(Clone)]
pub struct ProfilesService {
    repo: Repository,
}

impl ProfilesService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Get the caller's profile
    pub async fn get_profile(&self, owner_id: &str) -> Result<Profile> {
        self.repo.get_profile(owner_id).await
    }

    /// Replace the caller's profile record
    pub async fn update_profile(&self, owner_id: &str, req: UpdateProfileRequest) -> Result<Profile> {
        if !VALID_THEMES.contains(&req.theme.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid theme: {} (expected one of {:?})",
                req.theme, VALID_THEMES
            )));
        }

        // custom_columns is free-form but must at least be a JSON array
        let columns: Vec<serde_json::Value> = serde_json::from_str(&req.custom_columns)
            .map_err(|_| AppError::Validation("Custom columns must be a JSON array".to_string()))?;
        if columns.len() > MAX_CUSTOM_COLUMNS {
            return Err(AppError::Validation(format!(
                "At most {} custom columns",
                MAX_CUSTOM_COLUMNS
            )));
        }

        tracing::debug!("Updating profile: {}", owner_id);

        self.repo.update_profile(owner_id, req).await
    }
}
