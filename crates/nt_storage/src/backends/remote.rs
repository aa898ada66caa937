use async_trait::async_trait;
use nt_core::parse::{article_from_value, stories_from_value, story_from_value};
use nt_core::{Article, Error, Result, Story, StoryStorage};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_REMOTE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REMOTE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RemoteConfig {
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read-only client for the article service's story and article endpoints.
pub struct RemoteStorage {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for RemoteStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStorage")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl RemoteStorage {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.url)
            .map_err(|e| Error::Config(format!("Invalid backend URL {}: {}", config.url, e)))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Backend URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// GETs a JSON document; a 404 is reported as `None`.
    async fn fetch(&self, segments: &[&str]) -> Result<Option<Value>> {
        let url = self.endpoint(segments)?;
        debug!("🌐 GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<Value>().await?)),
            status => {
                warn!("⚠️ Article service returned {} for {}", status, url);
                Err(Error::Upstream(format!("{} returned {}", url, status)))
            }
        }
    }
}

#[async_trait]
impl StoryStorage for RemoteStorage {
    async fn store_story(&self, story: &Story) -> Result<()> {
        Err(Error::ReadOnly(format!(
            "remote storage cannot store story {}",
            story.id
        )))
    }

    async fn store_article(&self, article: &Article) -> Result<()> {
        Err(Error::ReadOnly(format!(
            "remote storage cannot store article {}",
            article.id
        )))
    }

    async fn get_story(&self, id: &str) -> Result<Option<Story>> {
        Ok(self
            .fetch(&["stories", id])
            .await?
            .and_then(|v| story_from_value(&v)))
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        Ok(self
            .fetch(&["articles", id])
            .await?
            .and_then(|v| article_from_value(&v)))
    }

    async fn find_story_for_article(&self, article_id: &str) -> Result<Option<Story>> {
        Ok(self
            .fetch(&["articles", article_id, "story"])
            .await?
            .and_then(|v| story_from_value(&v)))
    }

    async fn list_stories(&self) -> Result<Vec<Story>> {
        Ok(self
            .fetch(&["stories"])
            .await?
            .map(|v| stories_from_value(&v))
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Json, Router};
    use nt_core::BiasLabel;
    use serde_json::json;

    async fn story_handler(Path(id): Path<String>) -> std::result::Result<Json<Value>, AxumStatus> {
        match id.as_str() {
            "s1" => Ok(Json(json!({
                "id": "s1",
                "headline": "Flooding",
                "articles": [
                    { "id": "a", "biasLabel": "LEFT", "source": { "name": "Gazette" } },
                    { "id": "b", "biasLabel": "banana" }
                ]
            }))),
            "broken" => Err(AxumStatus::INTERNAL_SERVER_ERROR),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn spawn_service() -> String {
        let app = Router::new()
            .route("/api/stories", get(|| async { Json(json!([{ "id": "s1" }])) }))
            .route("/api/stories/:id", get(story_handler))
            .route(
                "/api/articles/:id",
                get(|Path(id): Path<String>| async move { Json(json!({ "id": id, "bias": "right" })) }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_endpoint_building() {
        let storage = RemoteStorage::new(RemoteConfig::default().with_url("http://news.example/base")).unwrap();
        let url = storage.endpoint(&["articles", "a b", "story"]).unwrap();
        assert_eq!(url.as_str(), "http://news.example/base/api/articles/a%20b/story");
    }

    #[test]
    fn test_invalid_url() {
        let result = RemoteStorage::new(RemoteConfig::default().with_url("not a url"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_remote_storage_against_service() {
        let base = spawn_service().await;
        let storage = RemoteStorage::new(RemoteConfig::default().with_url(&base)).unwrap();

        let story = storage.get_story("s1").await.unwrap().unwrap();
        assert_eq!(story.articles.len(), 2);
        assert_eq!(story.articles[0].bias_label, BiasLabel::Left);
        assert_eq!(story.articles[1].bias_label, BiasLabel::Unknown);
        assert_eq!(story.articles[0].source_name(), "Gazette");

        assert!(storage.get_story("missing").await.unwrap().is_none());
        assert!(matches!(storage.get_story("broken").await, Err(Error::Upstream(_))));

        let article = storage.get_article("x1").await.unwrap().unwrap();
        assert_eq!(article.bias_label, BiasLabel::Right);

        assert!(storage.find_story_for_article("x1").await.unwrap().is_none());
        assert_eq!(storage.list_stories().await.unwrap().len(), 1);
        assert!(matches!(storage.store_story(&story).await, Err(Error::ReadOnly(_))));
    }
}
