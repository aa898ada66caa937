use async_trait::async_trait;
use crate::types::{Article, Story};
use crate::Result;

#[async_trait]
pub trait StoryStorage: Send + Sync {
    /// Store a story, replacing any previous story with the same id
    async fn store_story(&self, story: &Story) -> Result<()>;

    /// Store an article that has not been grouped into a story yet
    async fn store_article(&self, article: &Article) -> Result<()>;

    /// Get a story by id
    async fn get_story(&self, id: &str) -> Result<Option<Story>>;

    /// Get a single article by id, whether or not it belongs to a story
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Find the story an article has been grouped into
    async fn find_story_for_article(&self, article_id: &str) -> Result<Option<Story>>;

    /// List every known story
    async fn list_stories(&self) -> Result<Vec<Story>>;

    /// Short backend name for logs
    fn name(&self) -> &str;
}
