//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to a frontend surface.

use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An identity issued by the authentication collaborator
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Per-user profile, provisioned automatically when the user row is created.
/// The profile id equals the user id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    /// One of "light", "dark", "system"
    pub theme: String,
    /// JSON-encoded list of user-defined job table columns,
    /// e.g. `[{"key":"salary","label":"Salary"}]`
    pub custom_columns: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-record profile replacement
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    pub theme: String,
    pub custom_columns: String,
}

/// A tracked job application
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: String,
    pub owner_id: String,
    pub role: String,
    pub company: String,
    /// Conventionally one of config::JOB_STATUSES; free text by design
    pub status: String,
    pub applied_on: Option<NaiveDate>,
    pub link: Option<String>,
    pub notes: Option<String>,
    /// JSON-encoded bag keyed by the profile's custom column keys
    pub custom_data: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create job application request
#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub role: String,
    pub company: String,
    pub status: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub custom_data: Option<String>,
}

/// Full-record job application replacement
#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub id: String,
    pub role: String,
    pub company: String,
    pub status: String,
    pub applied_on: Option<NaiveDate>,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub custom_data: String,
}

/// Ordering for job application listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOrder {
    #[default]
    CreatedAt,
    AppliedOn,
}

/// Filter for job application listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilter {
    /// Exact status match when present
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub order: JobOrder,
}

/// A folder in the per-user hierarchy. `parent_id = None` marks a root;
/// multiple roots per user are allowed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create folder request
#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
    pub parent_id: Option<String>,
}

/// Full-record folder replacement
#[derive(Debug, Deserialize)]
pub struct UpdateFolderRequest {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

/// Kind-specific payload of an item. The kind is fixed at creation time and
/// never changed thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemBody {
    /// Behavioral-interview narrative in STAR form
    Story {
        situation: String,
        task: String,
        action: String,
        result: String,
    },
    /// Free-form note
    Note { content: String },
}

impl ItemBody {
    /// Discriminator value as stored in the `kind` column
    pub fn kind(&self) -> &'static str {
        match self {
            ItemBody::Story { .. } => "story",
            ItemBody::Note { .. } => "note",
        }
    }
}

/// A story or note living in exactly one folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub owner_id: String,
    pub folder_id: String,
    pub title: String,
    #[serde(flatten)]
    pub body: ItemBody,
    /// Unordered, deduplicated at the application layer
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create item request
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub folder_id: String,
    pub title: String,
    pub body: ItemBody,
    pub tags: Vec<String>,
}

/// Full-record item replacement. The body must carry the same kind the item
/// was created with.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub id: String,
    pub folder_id: String,
    pub title: String,
    pub body: ItemBody,
    pub tags: Vec<String>,
}

/// Physical row shape of the `items` table: both kinds share one sparse
/// layout, discriminated by `kind`.
#[derive(Debug, FromRow)]
pub(crate) struct ItemRow {
    pub id: String,
    pub owner_id: String,
    pub folder_id: String,
    pub kind: String,
    pub title: String,
    pub situation: Option<String>,
    pub task: Option<String>,
    pub action: Option<String>,
    pub result: Option<String>,
    pub content: Option<String>,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = AppError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let body = match row.kind.as_str() {
            "story" => ItemBody::Story {
                situation: row.situation.unwrap_or_default(),
                task: row.task.unwrap_or_default(),
                action: row.action.unwrap_or_default(),
                result: row.result.unwrap_or_default(),
            },
            "note" => ItemBody::Note {
                content: row.content.unwrap_or_default(),
            },
            other => {
                return Err(AppError::Generic(format!("Unknown item kind: {}", other)));
            }
        };

        let tags: Vec<String> = serde_json::from_str(&row.tags)?;

        Ok(Item {
            id: row.id,
            owner_id: row.owner_id,
            folder_id: row.folder_id,
            title: row.title,
            body,
            tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
