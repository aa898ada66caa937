//! Conversion of untyped JSON payloads from the article service into typed records.
//!
//! Parsing here is lenient: unexpected field types are treated as absent and
//! bias labels are normalised, so a malformed record still yields an article.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::types::{confidence_from_value, Article, BiasLabel, Story};

/// Returns the first present field among `keys`.
fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys
        .iter()
        .find_map(|key| value.get(*key).filter(|v| !v.is_null()))
}

fn text(value: &Value, keys: &[&str]) -> Option<String> {
    field(value, keys)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn identifier(value: &Value, keys: &[&str]) -> Option<String> {
    match field(value, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn source_name(value: &Value) -> Option<String> {
    match field(value, &["source"])? {
        Value::Object(obj) => obj
            .get("name")
            .and_then(|n| n.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let raw = text(value, &["publishedAt", "published_at"])?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn confidence(value: &Value) -> f32 {
    field(value, &["biasConfidence", "bias_confidence"])
        .map(confidence_from_value)
        .unwrap_or(0.0)
}

fn keywords(value: &Value) -> Vec<String> {
    match field(value, &["keywords"]) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|k| k.as_str())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Builds an [`Article`] from one record of the article service.
///
/// Returns `None` only when the record is not a JSON object.
pub fn article_from_value(value: &Value) -> Option<Article> {
    if !value.is_object() {
        return None;
    }

    let url = text(value, &["url"]).unwrap_or_default();
    let id = identifier(value, &["id", "_id"]).unwrap_or_else(|| url.clone());
    let bias_label = field(value, &["biasLabel", "bias", "bias_label"])
        .and_then(|v| v.as_str())
        .map(BiasLabel::normalize)
        .unwrap_or_default();

    Some(Article {
        id,
        title: text(value, &["title"]).unwrap_or_default(),
        summary: text(value, &["summary"]).or_else(|| text(value, &["description"])),
        source: source_name(value),
        published_at: timestamp(value),
        url,
        bias_label,
        bias_confidence: confidence(value),
        bias_reasoning: text(value, &["biasReasoning", "bias_reasoning"]),
        keywords: keywords(value),
    })
}

/// Parses an article list, either a bare array or an object with an `articles` array.
pub fn articles_from_value(value: &Value) -> Vec<Article> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => match value.get("articles") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let article = article_from_value(item);
            if article.is_none() {
                tracing::warn!("⚠️ Skipping malformed article record at index {}", index);
            }
            article
        })
        .collect()
}

/// Builds a [`Story`] from a story-detail payload.
///
/// The bias distribution is always recomputed from the parsed articles rather
/// than trusted from the payload.
pub fn story_from_value(value: &Value) -> Option<Story> {
    let id = identifier(value, &["id", "_id"])?;
    let headline = text(value, &["headline", "title"]).unwrap_or_default();
    let summary = text(value, &["summary"]).unwrap_or_default();
    let category = text(value, &["category"]);
    let articles = articles_from_value(value);
    Some(Story::new(id, headline, summary, category, articles))
}

/// Parses a list of stories, either a bare array or an object with a `stories` array.
pub fn stories_from_value(value: &Value) -> Vec<Story> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => match value.get("stories") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    items.iter().filter_map(story_from_value).collect()
}
