use async_trait::async_trait;
use nt_core::parse::stories_from_value;
use nt_core::{Article, Result, Story, StoryStorage};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Default)]
pub struct MemoryStore {
    stories: BTreeMap<String, Story>,
    articles: BTreeMap<String, Article>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_story(&mut self, story: &Story) {
        self.stories.insert(story.id.clone(), story.clone());
    }

    pub fn store_article(&mut self, article: &Article) {
        self.articles.insert(article.id.clone(), article.clone());
    }

    pub fn get_story(&self, id: &str) -> Option<Story> {
        self.stories.get(id).cloned()
    }

    pub fn get_article(&self, id: &str) -> Option<Article> {
        self.stories
            .values()
            .flat_map(|s| s.articles.iter())
            .find(|a| a.id == id)
            .or_else(|| self.articles.get(id))
            .cloned()
    }

    pub fn find_story_for_article(&self, article_id: &str) -> Option<Story> {
        self.stories
            .values()
            .find(|s| s.contains_article(article_id))
            .cloned()
    }

    pub fn list_stories(&self) -> Vec<Story> {
        self.stories.values().cloned().collect()
    }
}

/// Story storage held in process memory. Stories are replaced wholesale on store.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stories(stories: Vec<Story>) -> Self {
        let mut store = MemoryStore::new();
        for story in &stories {
            store.store_story(story);
        }
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Seeds the storage from a JSON fixture: an array of stories or `{ "stories": [...] }`.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let stories = stories_from_value(&value);
        info!("📂 Loaded {} stories from {}", stories.len(), path.display());
        Ok(Self::with_stories(stories))
    }
}

#[async_trait]
impl StoryStorage for InMemoryStorage {
    async fn store_story(&self, story: &Story) -> Result<()> {
        debug!("Storing story {} ({} articles)", story.id, story.articles.len());
        self.store.write().await.store_story(story);
        Ok(())
    }

    async fn store_article(&self, article: &Article) -> Result<()> {
        self.store.write().await.store_article(article);
        Ok(())
    }

    async fn get_story(&self, id: &str) -> Result<Option<Story>> {
        Ok(self.store.read().await.get_story(id))
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self.store.read().await.get_article(id))
    }

    async fn find_story_for_article(&self, article_id: &str) -> Result<Option<Story>> {
        Ok(self.store.read().await.find_story_for_article(article_id))
    }

    async fn list_stories(&self) -> Result<Vec<Story>> {
        Ok(self.store.read().await.list_stories())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
