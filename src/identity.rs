//! Identity collaborator boundary
//!
//! User provisioning and lookup. Session handling and sign-in forms live
//! in the authentication provider, not here; this module only creates and
//! resolves the stable user identifier the ownership policy keys on.
//! Profile rows are provisioned by the database trigger installed in
//! migration 001, not by application code.

use crate::database::{Repository, UpdateProfileRequest, User};
use crate::error::{AppError, Result};

/// Service for identity provisioning
#[derive(Clone)]
pub struct IdentityService {
    repo: Repository,
}

impl IdentityService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Provision a new user. The matching profile appears automatically;
    /// setting the display name afterwards is a second, independent write.
    pub async fn sign_up(&self, email: &str, display_name: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation(format!("Invalid email: {}", email)));
        }

        tracing::info!("Provisioning user: {}", email);

        let user = self.repo.create_user(email).await?;

        if !display_name.trim().is_empty() {
            let profile = self.repo.get_profile(&user.id).await?;
            self.repo
                .update_profile(
                    &user.id,
                    UpdateProfileRequest {
                        display_name: display_name.trim().to_string(),
                        theme: profile.theme,
                        custom_columns: profile.custom_columns,
                    },
                )
                .await?;
        }

        tracing::info!("User provisioned: {}", user.id);
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.repo.get_user(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> (IdentityService, Repository) {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let repo = Repository::new(pool);
        (IdentityService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_sign_up_provisions_profile_with_display_name() {
        let (service, repo) = create_test_service().await;

        let user = service.sign_up("dev@example.com", "Dev").await.unwrap();

        let profile = repo.get_profile(&user.id).await.unwrap();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.display_name, "Dev");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_invalid_email() {
        let (service, _repo) = create_test_service().await;

        assert!(service.sign_up("", "Dev").await.is_err());
        assert!(service.sign_up("not-an-email", "Dev").await.is_err());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_storage() {
        let (service, _repo) = create_test_service().await;

        service.sign_up("dev@example.com", "Dev").await.unwrap();
        assert!(service.sign_up("dev@example.com", "Dev 2").await.is_err());
    }
}
