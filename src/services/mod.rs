//! Services module
//!
//! Business logic services that coordinate between callers and repository.

pub mod folders;
pub mod items;
pub mod jobs;
pub mod profiles;

pub use folders::FoldersService;
pub use items::ItemsService;
pub use jobs::JobsService;
pub use profiles::ProfilesService;
