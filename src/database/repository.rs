//! Repository layer for database operations
//!
//! This module provides CRUD operations for all entities. Every query is
//! scoped to the owning user: reads filter on the owner column, and
//! updates/deletes treat zero affected rows as not-found. This is the one
//! place the ownership policy is applied, instead of a near-identical rule
//! set per table.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Users & profiles =====

    /// Create a new user. The provisioning trigger inserts the matching
    /// profile row as part of the same statement.
    pub async fn create_user(&self, email: &str) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, created_at)
            VALUES (?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created user: {}", id);
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;

        Ok(user)
    }

    /// Get the caller's profile (profile id equals user id)
    pub async fn get_profile(&self, owner_id: &str) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = ?")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::ProfileNotFound(owner_id.to_string()))?;

        Ok(profile)
    }

    /// Replace the caller's profile record
    pub async fn update_profile(&self, owner_id: &str, req: UpdateProfileRequest) -> Result<Profile> {
        let now = Utc::now();

        let rows = sqlx::query(
            r#"
            UPDATE profiles
            SET display_name = ?, theme = ?, custom_columns = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&req.display_name)
        .bind(&req.theme)
        .bind(&req.custom_columns)
        .bind(now)
        .bind(owner_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::ProfileNotFound(owner_id.to_string()));
        }

        tracing::debug!("Updated profile: {}", owner_id);
        self.get_profile(owner_id).await
    }

    // ===== Job applications =====

    /// Create a job application
    pub async fn create_job(&self, owner_id: &str, req: CreateJobRequest) -> Result<JobApplication> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let status = req
            .status
            .unwrap_or_else(|| crate::config::DEFAULT_JOB_STATUS.to_string());
        let custom_data = req.custom_data.unwrap_or_else(|| "{}".to_string());

        let job = sqlx::query_as::<_, JobApplication>(
            r#"
            INSERT INTO job_applications
                (id, owner_id, role, company, status, applied_on, link, notes, custom_data, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(&req.role)
        .bind(&req.company)
        .bind(&status)
        .bind(req.applied_on)
        .bind(&req.link)
        .bind(&req.notes)
        .bind(&custom_data)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created job application: {}", id);
        Ok(job)
    }

    /// Get a job application by ID
    pub async fn get_job(&self, owner_id: &str, id: &str) -> Result<JobApplication> {
        let job = sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE id = ? AND owner_id = ?",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::JobNotFound(id.to_string()))?;

        Ok(job)
    }

    /// List job applications with an optional status predicate and ordering
    pub async fn list_jobs(&self, owner_id: &str, filter: &JobFilter) -> Result<Vec<JobApplication>> {
        let order_clause = match filter.order {
            JobOrder::CreatedAt => "created_at DESC",
            JobOrder::AppliedOn => "applied_on DESC",
        };

        let jobs = if let Some(status) = &filter.status {
            sqlx::query_as::<_, JobApplication>(&format!(
                "SELECT * FROM job_applications WHERE owner_id = ? AND status = ? ORDER BY {}",
                order_clause
            ))
            .bind(owner_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, JobApplication>(&format!(
                "SELECT * FROM job_applications WHERE owner_id = ? ORDER BY {}",
                order_clause
            ))
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(jobs)
    }

    /// Replace a job application record
    pub async fn update_job(&self, owner_id: &str, req: UpdateJobRequest) -> Result<JobApplication> {
        let now = Utc::now();

        let rows = sqlx::query(
            r#"
            UPDATE job_applications
            SET role = ?, company = ?, status = ?, applied_on = ?, link = ?, notes = ?, custom_data = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&req.role)
        .bind(&req.company)
        .bind(&req.status)
        .bind(req.applied_on)
        .bind(&req.link)
        .bind(&req.notes)
        .bind(&req.custom_data)
        .bind(now)
        .bind(&req.id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::JobNotFound(req.id));
        }

        self.get_job(owner_id, &req.id).await
    }

    /// Delete a job application
    pub async fn delete_job(&self, owner_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM job_applications WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::JobNotFound(id.to_string()));
        }

        tracing::debug!("Deleted job application: {}", id);
        Ok(())
    }

    // ===== Folders =====

    /// Create a folder
    pub async fn create_folder(&self, owner_id: &str, req: CreateFolderRequest) -> Result<Folder> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let folder = sqlx::query_as::<_, Folder>(
            r#"
            INSERT INTO folders (id, owner_id, name, parent_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(&req.name)
        .bind(&req.parent_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created folder: {}", id);
        Ok(folder)
    }

    /// Get a folder by ID
    pub async fn get_folder(&self, owner_id: &str, id: &str) -> Result<Folder> {
        let folder =
            sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ? AND owner_id = ?")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::FolderNotFound(id.to_string()))?;

        Ok(folder)
    }

    /// List all folders owned by the caller, the flat set the tree builder
    /// consumes
    pub async fn list_folders(&self, owner_id: &str) -> Result<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = ? ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(folders)
    }

    /// Replace a folder record (name and parent)
    pub async fn update_folder(&self, owner_id: &str, req: UpdateFolderRequest) -> Result<Folder> {
        let now = Utc::now();

        let rows = sqlx::query(
            r#"
            UPDATE folders
            SET name = ?, parent_id = ?, updated_at = ?
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&req.name)
        .bind(&req.parent_id)
        .bind(now)
        .bind(&req.id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::FolderNotFound(req.id));
        }

        self.get_folder(owner_id, &req.id).await
    }

    /// Delete a folder. The subtree and every item under it go with it via
    /// the declared cascades.
    pub async fn delete_folder(&self, owner_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM folders WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::FolderNotFound(id.to_string()));
        }

        tracing::debug!("Deleted folder: {}", id);
        Ok(())
    }

    /// IDs of a folder and all its ancestors, walking the parent chain
    pub async fn folder_ancestors(&self, owner_id: &str, id: &str) -> Result<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            WITH RECURSIVE ancestors AS (
                SELECT id, parent_id FROM folders WHERE id = ? AND owner_id = ?
                UNION ALL
                SELECT f.id, f.parent_id
                FROM folders f
                JOIN ancestors a ON f.id = a.parent_id
                WHERE f.owner_id = ?
            )
            SELECT id FROM ancestors
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    // ===== Items =====

    /// Create an item (story or note)
    pub async fn create_item(&self, owner_id: &str, req: CreateItemRequest) -> Result<Item> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let tags = serde_json::to_string(&req.tags)?;
        let (situation, task, action, result, content) = body_columns(&req.body);

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items
                (id, owner_id, folder_id, kind, title, situation, task, action, result, content, tags, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(&req.folder_id)
        .bind(req.body.kind())
        .bind(&req.title)
        .bind(situation)
        .bind(task)
        .bind(action)
        .bind(result)
        .bind(content)
        .bind(&tags)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created {} item: {}", req.body.kind(), id);
        row.try_into()
    }

    /// Get an item by ID
    pub async fn get_item(&self, owner_id: &str, id: &str) -> Result<Item> {
        let row = sqlx::query_as::<_, ItemRow>("SELECT * FROM items WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::ItemNotFound(id.to_string()))?;

        row.try_into()
    }

    /// List items in one folder. Non-recursive: items in subfolders are not
    /// included. Both kinds are returned uniformly.
    pub async fn list_items_in_folder(&self, owner_id: &str, folder_id: &str) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT * FROM items
            WHERE owner_id = ? AND folder_id = ?
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    /// List items carrying a tag, via JSON array containment
    pub async fn list_items_tagged(&self, owner_id: &str, tag: &str) -> Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT * FROM items
            WHERE owner_id = ?
              AND EXISTS (SELECT 1 FROM json_each(items.tags) WHERE json_each.value = ?)
            ORDER BY updated_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    /// Replace an item record. The `kind` predicate keeps the discriminator
    /// immutable at the storage layer as well.
    pub async fn update_item(&self, owner_id: &str, req: UpdateItemRequest) -> Result<Item> {
        let now = Utc::now();
        let tags = serde_json::to_string(&req.tags)?;
        let (situation, task, action, result, content) = body_columns(&req.body);

        let rows = sqlx::query(
            r#"
            UPDATE items
            SET folder_id = ?, title = ?, situation = ?, task = ?, action = ?, result = ?, content = ?, tags = ?, updated_at = ?
            WHERE id = ? AND owner_id = ? AND kind = ?
            "#,
        )
        .bind(&req.folder_id)
        .bind(&req.title)
        .bind(situation)
        .bind(task)
        .bind(action)
        .bind(result)
        .bind(content)
        .bind(&tags)
        .bind(now)
        .bind(&req.id)
        .bind(owner_id)
        .bind(req.body.kind())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::ItemNotFound(req.id));
        }

        self.get_item(owner_id, &req.id).await
    }

    /// Delete an item
    pub async fn delete_item(&self, owner_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM items WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::ItemNotFound(id.to_string()));
        }

        tracing::debug!("Deleted item: {}", id);
        Ok(())
    }

    /// Count items in a folder
    pub async fn count_items_in_folder(&self, owner_id: &str, folder_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE owner_id = ? AND folder_id = ?")
                .bind(owner_id)
                .bind(folder_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

/// Sparse column values for one body variant
fn body_columns(
    body: &ItemBody,
) -> (
    Option<&str>,
    Option<&str>,
    Option<&str>,
    Option<&str>,
    Option<&str>,
) {
    match body {
        ItemBody::Story {
            situation,
            task,
            action,
            result,
        } => (
            Some(situation.as_str()),
            Some(task.as_str()),
            Some(action.as_str()),
            Some(result.as_str()),
            None,
        ),
        ItemBody::Note { content } => (None, None, None, None, Some(content.as_str())),
    }
}
