use nt_core::{Article, Error, Result, StoryStorage};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::report::CoverageReport;
use crate::synthesis::synthesize_story;
use crate::CoverageConfig;

/// Fetches a story's articles from storage and turns them into a coverage report.
pub struct CoverageService {
    storage: Arc<dyn StoryStorage>,
    config: CoverageConfig,
}

impl fmt::Debug for CoverageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverageService")
            .field("storage", &self.storage.name())
            .field("config", &self.config)
            .finish()
    }
}

impl CoverageService {
    pub fn new(storage: Arc<dyn StoryStorage>, config: CoverageConfig) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &Arc<dyn StoryStorage> {
        &self.storage
    }

    pub async fn story_coverage(&self, story_id: &str) -> Result<CoverageReport> {
        info!("📰 Loading coverage for story {}", story_id);
        let story = self
            .storage
            .get_story(story_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("story {}", story_id)))?;

        let report = CoverageReport::for_story(&story, &self.config);
        debug!(
            "Story {} compared {} of {} articles",
            story.id,
            report.breakdown.total_articles,
            story.articles.len()
        );
        Ok(report)
    }

    /// Coverage for the story an article belongs to. An article that has not
    /// been grouped yet is compared on its own.
    pub async fn article_coverage(&self, article_id: &str) -> Result<CoverageReport> {
        info!("📰 Loading coverage for article {}", article_id);
        if let Some(story) = self.storage.find_story_for_article(article_id).await? {
            return Ok(CoverageReport::for_story(&story, &self.config));
        }

        let article = self
            .storage
            .get_article(article_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("article {}", article_id)))?;

        info!("🧩 Article {} has no story yet, comparing it alone", article_id);
        let story = synthesize_story(&article);
        Ok(CoverageReport::for_story(&story, &self.config))
    }

    /// Compares an article list the caller already holds.
    pub fn compare(&self, articles: &[Article]) -> CoverageReport {
        CoverageReport::for_articles(articles, &self.config)
    }
}
