use log::info;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::{Catalog, CatalogError, SeedDocument};
use crate::core::config::AppConfig;
use crate::moderation::ModerationQueue;
use crate::progress::{open_store, KeyValueStore, ProgressTracker};

/// Everything the handlers share. Catalog content is immutable after
/// startup; progress goes through the tracker's store and the review queue
/// is guarded by its own lock.
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub progress: Arc<ProgressTracker>,
    pub submissions: RwLock<ModerationQueue>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        seed: SeedDocument,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, CatalogError> {
        let (catalog, submissions) = seed.into_parts()?;
        let catalog = Arc::new(catalog);
        info!(
            "Catalog ready: {} categories, {} courses, {} submissions",
            catalog.categories().len(),
            catalog.courses().len(),
            submissions.len()
        );

        let progress = Arc::new(ProgressTracker::new(
            store,
            catalog.clone(),
            config.storage.on_corrupt,
        ));

        Ok(Self {
            config,
            catalog,
            progress,
            submissions: RwLock::new(ModerationQueue::new(submissions)),
        })
    }

    /// Loads the seed and opens the configured progress store.
    pub fn from_config(config: AppConfig) -> Result<Self, anyhow::Error> {
        let seed = SeedDocument::load(config.catalog.seed_path.as_deref())?;
        let store = open_store(&config.storage)?;
        Ok(Self::new(config, seed, store)?)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("courses", &self.catalog.courses().len())
            .finish_non_exhaustive()
    }
}
