use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Display fallback for articles whose publisher is not known.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Id prefix marking a story built from a single ungrouped article.
pub const SYNTHESIZED_STORY_PREFIX: &str = "single-";

/// Political-leaning label attached to an article by the bias-analysis service.
///
/// The set is closed: anything the service sends that is not one of the three
/// named leanings folds to [`BiasLabel::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiasLabel {
    Left,
    Center,
    Right,
    #[default]
    Unknown,
}

impl BiasLabel {
    pub const ALL: [BiasLabel; 4] = [
        BiasLabel::Left,
        BiasLabel::Center,
        BiasLabel::Right,
        BiasLabel::Unknown,
    ];

    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "left" => BiasLabel::Left,
            "center" => BiasLabel::Center,
            "right" => BiasLabel::Right,
            _ => BiasLabel::Unknown,
        }
    }

    pub fn perspective(self) -> Option<Perspective> {
        match self {
            BiasLabel::Left => Some(Perspective::Left),
            BiasLabel::Center => Some(Perspective::Center),
            BiasLabel::Right => Some(Perspective::Right),
            BiasLabel::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BiasLabel::Left => "left",
            BiasLabel::Center => "center",
            BiasLabel::Right => "right",
            BiasLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BiasLabel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(BiasLabel::normalize).unwrap_or_default())
    }
}

/// One of the three columns of the coverage comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Left,
    Center,
    Right,
}

impl Perspective {
    pub const ALL: [Perspective; 3] = [Perspective::Left, Perspective::Center, Perspective::Right];

    pub fn label(self) -> BiasLabel {
        match self {
            Perspective::Left => BiasLabel::Left,
            Perspective::Center => BiasLabel::Center,
            Perspective::Right => BiasLabel::Right,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.label().as_str()
    }
}

impl fmt::Display for Perspective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub bias_label: BiasLabel,
    #[serde(default, deserialize_with = "clamped_confidence")]
    pub bias_confidence: f32,
    #[serde(default)]
    pub bias_reasoning: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Reads a confidence from a number or numeric string, clamped to `[0, 1]`.
/// Anything else, NaN included, reads as 0.
pub(crate) fn confidence_from_value(value: &serde_json::Value) -> f32 {
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(c) if c.is_finite() => c.clamp(0.0, 1.0) as f32,
        _ => 0.0,
    }
}

fn clamped_confidence<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(confidence_from_value(&value))
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            source: None,
            published_at: None,
            url: String::new(),
            bias_label: BiasLabel::Unknown,
            bias_confidence: 0.0,
            bias_reasoning: None,
            keywords: Vec::new(),
        }
    }

    pub fn with_bias(mut self, label: BiasLabel, confidence: f32) -> Self {
        self.bias_label = label;
        self.bias_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    /// A confidence of 0 means the bias service never looked at the article.
    pub fn is_analyzed(&self) -> bool {
        self.bias_confidence > 0.0
    }
}

/// Per-label article counts for a story, unknown included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasDistribution {
    pub left: usize,
    pub center: usize,
    pub right: usize,
    pub unknown: usize,
}

impl BiasDistribution {
    pub fn from_articles(articles: &[Article]) -> Self {
        let mut distribution = Self::default();
        for article in articles {
            distribution.increment(article.bias_label);
        }
        distribution
    }

    pub fn increment(&mut self, label: BiasLabel) {
        match label {
            BiasLabel::Left => self.left += 1,
            BiasLabel::Center => self.center += 1,
            BiasLabel::Right => self.right += 1,
            BiasLabel::Unknown => self.unknown += 1,
        }
    }

    pub fn get(&self, label: BiasLabel) -> usize {
        match label {
            BiasLabel::Left => self.left,
            BiasLabel::Center => self.center,
            BiasLabel::Right => self.right,
            BiasLabel::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.left + self.center + self.right + self.unknown
    }
}

/// A cluster of articles about the same real-world event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub bias_distribution: BiasDistribution,
}

impl Story {
    pub fn new(
        id: impl Into<String>,
        headline: impl Into<String>,
        summary: impl Into<String>,
        category: Option<String>,
        articles: Vec<Article>,
    ) -> Self {
        let bias_distribution = BiasDistribution::from_articles(&articles);
        Self {
            id: id.into(),
            headline: headline.into(),
            summary: summary.into(),
            category,
            articles,
            bias_distribution,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.id.starts_with(SYNTHESIZED_STORY_PREFIX)
    }

    pub fn contains_article(&self, article_id: &str) -> bool {
        self.articles.iter().any(|a| a.id == article_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bias_label() {
        assert_eq!(BiasLabel::normalize("left"), BiasLabel::Left);
        assert_eq!(BiasLabel::normalize("LEFT"), BiasLabel::Left);
        assert_eq!(BiasLabel::normalize(" Right "), BiasLabel::Right);
        assert_eq!(BiasLabel::normalize("Center"), BiasLabel::Center);
        assert_eq!(BiasLabel::normalize("banana"), BiasLabel::Unknown);
        assert_eq!(BiasLabel::normalize(""), BiasLabel::Unknown);
        assert_eq!(BiasLabel::normalize("centre"), BiasLabel::Unknown);
    }

    #[test]
    fn test_bias_label_deserialize_is_total() {
        let label: BiasLabel = serde_json::from_str("\"RIGHT\"").unwrap();
        assert_eq!(label, BiasLabel::Right);
        let label: BiasLabel = serde_json::from_str("42").unwrap();
        assert_eq!(label, BiasLabel::Unknown);
        let label: BiasLabel = serde_json::from_str("null").unwrap();
        assert_eq!(label, BiasLabel::Unknown);
        assert_eq!(serde_json::to_string(&BiasLabel::Center).unwrap(), "\"center\"");
    }

    #[test]
    fn test_article_defaults() {
        let article: Article = serde_json::from_str(r#"{"id": "a1", "biasLabel": "Left"}"#).unwrap();
        assert_eq!(article.bias_label, BiasLabel::Left);
        assert_eq!(article.source_name(), UNKNOWN_SOURCE);
        assert!(!article.is_analyzed());
        assert!(article.keywords.is_empty());
    }

    #[test]
    fn test_article_confidence_is_clamped() {
        let article: Article = serde_json::from_str(r#"{"id": "a", "biasConfidence": 4.2}"#).unwrap();
        assert_eq!(article.bias_confidence, 1.0);
        let article: Article = serde_json::from_str(r#"{"id": "b", "biasConfidence": -0.3}"#).unwrap();
        assert_eq!(article.bias_confidence, 0.0);
        let article: Article = serde_json::from_str(r#"{"id": "c", "biasConfidence": "0.25"}"#).unwrap();
        assert_eq!(article.bias_confidence, 0.25);
        let article: Article = serde_json::from_str(r#"{"id": "d", "biasConfidence": null}"#).unwrap();
        assert_eq!(article.bias_confidence, 0.0);
    }

    #[test]
    fn test_story_distribution() {
        let story = Story::new(
            "s1",
            "Headline",
            "",
            None,
            vec![
                Article::new("a", "A").with_bias(BiasLabel::Left, 0.9),
                Article::new("b", "B").with_bias(BiasLabel::Left, 0.8),
                Article::new("c", "C"),
            ],
        );
        assert_eq!(story.bias_distribution.left, 2);
        assert_eq!(story.bias_distribution.unknown, 1);
        assert_eq!(story.bias_distribution.total(), 3);
        assert!(!story.is_synthesized());
        assert!(story.contains_article("c"));
    }
}
