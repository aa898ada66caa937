use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use nt_core::parse::{articles_from_value, story_from_value};
use nt_core::{Article, Error, Story};
use nt_coverage::{CoverageReport, StorySummary};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

pub async fn list_stories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<StorySummary>>> {
    let stories = state.storage().list_stories().await?;
    Ok(Json(stories.iter().map(StorySummary::from).collect()))
}

pub async fn create_story(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<StorySummary>)> {
    let story = story_from_value(&payload)
        .ok_or_else(|| Error::InvalidInput("story payload needs an id".to_string()))?;
    info!("🗞️ Storing story {} with {} articles", story.id, story.articles.len());
    state.storage().store_story(&story).await?;
    Ok((StatusCode::CREATED, Json(StorySummary::from(&story))))
}

pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Story>> {
    let story = state
        .storage()
        .get_story(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("story {}", id)))?;
    Ok(Json(story))
}

pub async fn get_story_coverage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CoverageReport>> {
    Ok(Json(state.coverage.story_coverage(&id).await?))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Article>> {
    let article = state
        .storage()
        .get_article(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("article {}", id)))?;
    Ok(Json(article))
}

pub async fn get_article_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Story>> {
    let story = state
        .storage()
        .find_story_for_article(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("story for article {}", id)))?;
    Ok(Json(story))
}

pub async fn get_article_coverage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CoverageReport>> {
    Ok(Json(state.coverage.article_coverage(&id).await?))
}

pub async fn compare_articles(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<CoverageReport>> {
    if !(payload.is_array() || payload.get("articles").map_or(false, Value::is_array)) {
        return Err(Error::InvalidInput(
            "expected an article array or an object with an articles array".to_string(),
        )
        .into());
    }
    let articles = articles_from_value(&payload);
    Ok(Json(state.coverage.compare(&articles)))
}
