//! Application state and initialization
//!
//! The embedding shell (a desktop or web frontend, out of scope here)
//! calls `setup` once on startup and routes every user action through the
//! services on `AppState`.

use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::identity::IdentityService;
use crate::services::{FoldersService, ItemsService, JobsService, ProfilesService};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub repo: Repository,
    pub identity: IdentityService,
    pub profiles: ProfilesService,
    pub jobs: JobsService,
    pub folders: FoldersService,
    pub items: ItemsService,
}

/// Application setup - called once on startup
pub async fn setup(app_data_dir: PathBuf) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", app_data_dir);

    std::fs::create_dir_all(&app_data_dir)?;

    let pool = create_pool(&app_data_dir.join("jobtrail.db")).await?;
    let repo = Repository::new(pool);

    let state = AppState {
        app_data_dir,
        identity: IdentityService::new(repo.clone()),
        profiles: ProfilesService::new(repo.clone()),
        jobs: JobsService::new(repo.clone()),
        folders: FoldersService::new(repo.clone()),
        items: ItemsService::new(repo.clone()),
        repo,
    };

    tracing::info!("Application initialized successfully");

    Ok(state)
}

/// Initialize logging for an embedding shell
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobtrail=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
