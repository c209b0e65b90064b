//! Items service
//!
//! Stories and notes living in folders. Both kinds go through the same
//! folder-scoped listing; the kind is fixed at creation time. Tag editing
//! is idempotent and tags are deduplicated before anything is stored.

use crate::config::{MAX_ITEM_TITLE_LENGTH, MAX_TAGS_PER_ITEM, MAX_TAG_LENGTH};
use crate::database::{CreateItemRequest, Item, Repository, UpdateItemRequest};
use crate::error::{AppError, Result};

/// Service for managing folder items
#[derive(Clone)]
pub struct ItemsService {
    repo: Repository,
}

impl ItemsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create an item in a folder owned by the caller
    pub async fn create_item(&self, owner_id: &str, mut req: CreateItemRequest) -> Result<Item> {
        validate_title(&req.title)?;
        req.tags = normalize_tags(req.tags)?;

        // Resolving through the owner scope rejects cross-user folders
        self.repo.get_folder(owner_id, &req.folder_id).await?;

        tracing::info!("Creating {} item: {}", req.body.kind(), req.title);

        let item = self.repo.create_item(owner_id, req).await?;

        tracing::info!("Item created: {}", item.id);
        Ok(item)
    }

    /// Get an item by ID
    pub async fn get_item(&self, owner_id: &str, id: &str) -> Result<Item> {
        self.repo.get_item(owner_id, id).await
    }

    /// List the items of one folder, both kinds, non-recursive
    pub async fn list_items_in_folder(&self, owner_id: &str, folder_id: &str) -> Result<Vec<Item>> {
        self.repo.list_items_in_folder(owner_id, folder_id).await
    }

    /// List items carrying a tag
    pub async fn list_items_tagged(&self, owner_id: &str, tag: &str) -> Result<Vec<Item>> {
        self.repo.list_items_tagged(owner_id, tag).await
    }

    /// Count items in a folder
    pub async fn count_items_in_folder(&self, owner_id: &str, folder_id: &str) -> Result<i64> {
        self.repo.count_items_in_folder(owner_id, folder_id).await
    }

    /// Replace an item record. The body must carry the kind the item was
    /// created with; changing kind is rejected before the storage call.
    pub async fn update_item(&self, owner_id: &str, mut req: UpdateItemRequest) -> Result<Item> {
        validate_title(&req.title)?;
        req.tags = normalize_tags(req.tags)?;

        let existing = self.repo.get_item(owner_id, &req.id).await?;
        if existing.body.kind() != req.body.kind() {
            return Err(AppError::Validation(format!(
                "Item kind is fixed at creation: cannot change {} to {}",
                existing.body.kind(),
                req.body.kind()
            )));
        }

        if req.folder_id != existing.folder_id {
            self.repo.get_folder(owner_id, &req.folder_id).await?;
        }

        tracing::debug!("Updating item: {}", req.id);

        self.repo.update_item(owner_id, req).await
    }

    /// Move an item into another folder owned by the caller
    pub async fn move_item(&self, owner_id: &str, id: &str, folder_id: &str) -> Result<Item> {
        let item = self.repo.get_item(owner_id, id).await?;
        self.repo.get_folder(owner_id, folder_id).await?;

        tracing::info!("Moving item {} to folder {}", id, folder_id);

        self.repo
            .update_item(
                owner_id,
                UpdateItemRequest {
                    id: item.id,
                    folder_id: folder_id.to_string(),
                    title: item.title,
                    body: item.body,
                    tags: item.tags,
                },
            )
            .await
    }

    /// Delete an item
    pub async fn delete_item(&self, owner_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting item: {}", id);

        self.repo.delete_item(owner_id, id).await
    }
}

/// Add a tag to a draft tag list. Adding a tag that is already present is
/// a no-op.
pub fn add_tag(tags: &mut Vec<String>, tag: &str) {
    let tag = tag.trim();
    if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Remove a tag from a draft tag list. Removing a tag that is not present
/// is a no-op.
pub fn remove_tag(tags: &mut Vec<String>, tag: &str) {
    tags.retain(|t| t != tag.trim());
}

/// Trim, drop empties, and deduplicate while keeping first-seen order
fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if tag.len() > MAX_TAG_LENGTH {
            return Err(AppError::Validation(format!(
                "Tag must be at most {} characters",
                MAX_TAG_LENGTH
            )));
        }
        if !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }

    if normalized.len() > MAX_TAGS_PER_ITEM {
        return Err(AppError::Validation(format!(
            "At most {} tags per item",
            MAX_TAGS_PER_ITEM
        )));
    }

    Ok(normalized)
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if title.len() > MAX_ITEM_TITLE_LENGTH {
        return Err(AppError::Validation(format!(
            "Title must be at most {} characters",
            MAX_ITEM_TITLE_LENGTH
        )));
    }
    Ok(())
}
