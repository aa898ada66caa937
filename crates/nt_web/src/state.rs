use nt_core::StoryStorage;
use nt_coverage::{CoverageConfig, CoverageService};
use std::sync::Arc;

pub struct AppState {
    pub coverage: CoverageService,
}

impl AppState {
    pub fn new(storage: Arc<dyn StoryStorage>, config: CoverageConfig) -> Self {
        Self {
            coverage: CoverageService::new(storage, config),
        }
    }

    pub fn storage(&self) -> &Arc<dyn StoryStorage> {
        self.coverage.storage()
    }
}
