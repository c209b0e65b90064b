//! Folders service
//!
//! Folder hierarchy operations. Parents are always resolved through the
//! caller's owner scope, so another user's folder can never become a
//! parent, and reparenting is guarded by an ancestor-chain check so a
//! folder can never be moved under its own descendant.

use crate::config::MAX_FOLDER_NAME_LENGTH;
use crate::database::{CreateFolderRequest, Folder, Repository, UpdateFolderRequest};
use crate::error::{AppError, Result};
use crate::tree::{FolderTree, TreeState};

/// Service for managing the folder hierarchy
#[derive(Clone)]
pub struct FoldersService {
    repo: Repository,
}

impl FoldersService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a folder, optionally under a parent owned by the same user
    pub async fn create_folder(
        &self,
        owner_id: &str,
        name: &str,
        parent_id: Option<String>,
    ) -> Result<Folder> {
        validate_name(name)?;

        if let Some(parent) = &parent_id {
            // Resolving through the owner scope rejects cross-user parents
            self.repo.get_folder(owner_id, parent).await?;
        }

        tracing::info!("Creating folder: {}", name);

        let folder = self
            .repo
            .create_folder(
                owner_id,
                CreateFolderRequest {
                    name: name.trim().to_string(),
                    parent_id,
                },
            )
            .await?;

        tracing::info!("Folder created: {}", folder.id);
        Ok(folder)
    }

    /// Get a folder by ID
    pub async fn get_folder(&self, owner_id: &str, id: &str) -> Result<Folder> {
        self.repo.get_folder(owner_id, id).await
    }

    /// List the caller's complete flat folder set
    pub async fn list_folders(&self, owner_id: &str) -> Result<Vec<Folder>> {
        self.repo.list_folders(owner_id).await
    }

    /// Build the display forest from the caller's folders
    pub async fn folder_tree(&self, owner_id: &str, state: &TreeState) -> Result<FolderTree> {
        let folders = self.repo.list_folders(owner_id).await?;
        Ok(FolderTree::build(folders, state))
    }

    /// Rename a folder in place
    pub async fn rename_folder(&self, owner_id: &str, id: &str, name: &str) -> Result<Folder> {
        validate_name(name)?;

        let folder = self.repo.get_folder(owner_id, id).await?;

        tracing::debug!("Renaming folder {} to {}", id, name);

        self.repo
            .update_folder(
                owner_id,
                UpdateFolderRequest {
                    id: folder.id,
                    name: name.trim().to_string(),
                    parent_id: folder.parent_id,
                },
            )
            .await
    }

    /// Move a folder under a new parent (or to the root when `None`).
    ///
    /// The new parent's ancestor chain is checked before anything is
    /// persisted: if the folder itself appears in it, the move would close
    /// a cycle and is rejected.
    pub async fn move_folder(
        &self,
        owner_id: &str,
        id: &str,
        new_parent_id: Option<String>,
    ) -> Result<Folder> {
        let folder = self.repo.get_folder(owner_id, id).await?;

        if let Some(parent) = &new_parent_id {
            self.repo.get_folder(owner_id, parent).await?;

            let ancestors = self.repo.folder_ancestors(owner_id, parent).await?;
            if ancestors.iter().any(|a| a == id) {
                return Err(AppError::Validation(format!(
                    "Cannot move folder {} under its own descendant",
                    id
                )));
            }
        }

        tracing::info!("Moving folder {} under {:?}", id, new_parent_id);

        self.repo
            .update_folder(
                owner_id,
                UpdateFolderRequest {
                    id: folder.id,
                    name: folder.name,
                    parent_id: new_parent_id,
                },
            )
            .await
    }

    /// Delete a folder; the cascade removes its subtree and every item in
    /// any descendant
    pub async fn delete_folder(&self, owner_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting folder: {}", id);

        self.repo.delete_folder(owner_id, id).await
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Folder name is required".to_string()));
    }
    if name.len() > MAX_FOLDER_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Folder name must be at most {} characters",
            MAX_FOLDER_NAME_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> (FoldersService, String) {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let repo = Repository::new(pool);
        let user = repo.create_user("dev@example.com").await.unwrap();

        (FoldersService::new(repo), user.id)
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let (service, owner) = create_test_service().await;

        assert!(service.create_folder(&owner, "", None).await.is_err());
        assert!(service.create_folder(&owner, "   ", None).await.is_err());
    }

    #[tokio::test]
    async fn test_move_into_own_descendant_is_rejected() {
        let (service, owner) = create_test_service().await;

        let a = service.create_folder(&owner, "A", None).await.unwrap();
        let b = service
            .create_folder(&owner, "B", Some(a.id.clone()))
            .await
            .unwrap();
        let c = service
            .create_folder(&owner, "C", Some(b.id.clone()))
            .await
            .unwrap();

        // A -> C would close the cycle A -> B -> C -> A
        let result = service.move_folder(&owner, &a.id, Some(c.id.clone())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        // A -> A is the degenerate cycle
        let result = service.move_folder(&owner, &a.id, Some(a.id.clone())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        // Stored parent is unchanged after the rejected moves
        let a_after = service.get_folder(&owner, &a.id).await.unwrap();
        assert_eq!(a_after.parent_id, None);
    }

    #[tokio::test]
    async fn test_move_to_sibling_and_root() {
        let (service, owner) = create_test_service().await;

        let a = service.create_folder(&owner, "A", None).await.unwrap();
        let b = service
            .create_folder(&owner, "B", Some(a.id.clone()))
            .await
            .unwrap();
        let c = service
            .create_folder(&owner, "C", Some(a.id.clone()))
            .await
            .unwrap();

        let moved = service
            .move_folder(&owner, &c.id, Some(b.id.clone()))
            .await
            .unwrap();
        assert_eq!(moved.parent_id, Some(b.id.clone()));

        let moved = service.move_folder(&owner, &c.id, None).await.unwrap();
        assert_eq!(moved.parent_id, None);
    }

    #[tokio::test]
    async fn test_cross_user_parent_is_not_found() {
        let (service, owner) = create_test_service().await;

        // Second user in the same database
        let repo = service.repo.clone();
        let other = repo.create_user("other@example.com").await.unwrap();
        let other_folder = repo
            .create_folder(
                &other.id,
                CreateFolderRequest {
                    name: "theirs".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        let result = service
            .create_folder(&owner, "mine", Some(other_folder.id.clone()))
            .await;
        assert!(matches!(result, Err(AppError::FolderNotFound(_))));
    }

    #[tokio::test]
    async fn test_folder_tree_reflects_hierarchy() {
        let (service, owner) = create_test_service().await;

        let a = service.create_folder(&owner, "A", None).await.unwrap();
        service
            .create_folder(&owner, "B", Some(a.id.clone()))
            .await
            .unwrap();

        let tree = service
            .folder_tree(&owner, &TreeState::new())
            .await
            .unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].folder.id, a.id);
    }
}
