//! Application configuration constants
//!
//! Central location for validation boundaries and well-known value lists
//! used throughout the library.

// ===== Field Length Limits =====

/// Maximum length for a job role or company name.
/// Prevents excessively long values from being stored.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for a folder name
pub const MAX_FOLDER_NAME_LENGTH: usize = 120;

/// Maximum length for an item title
pub const MAX_ITEM_TITLE_LENGTH: usize = 200;

/// Maximum length for a single tag
pub const MAX_TAG_LENGTH: usize = 60;

/// Maximum number of tags on one item
pub const MAX_TAGS_PER_ITEM: usize = 32;

// ===== Job Application Statuses =====

/// Conventional job application statuses. The column is free text, so these
/// are a convention for the views, not a constraint the storage enforces.
pub const JOB_STATUSES: &[&str] = &["Applied", "Interview", "Offer", "Rejected", "Withdrawn"];

/// Status assigned when a job application is created without one
pub const DEFAULT_JOB_STATUS: &str = "Applied";

// ===== Profile Settings =====

/// Valid theme preferences for a profile
pub const VALID_THEMES: &[&str] = &["light", "dark", "system"];

/// Theme assigned to a freshly provisioned profile. The provisioning
/// trigger in migration 001 stores this same value.
pub const DEFAULT_THEME: &str = "system";

/// Maximum number of user-defined job table columns per profile
pub const MAX_CUSTOM_COLUMNS: usize = 20;

// ===== Folder Hierarchy =====

/// Name of the folder that migration 002 moves legacy stories and notes into
pub const IMPORTED_FOLDER_NAME: &str = "Imported";
