//! Values the comparison view derives for display. None of these change the breakdown.

use nt_core::{Article, BiasLabel, Perspective};
use serde::Serialize;
use std::cmp::Ordering;

use crate::aggregate::CoverageBreakdown;

pub const DEFAULT_BADGE_THRESHOLD: f32 = 0.6;
pub const DEFAULT_KEYWORD_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasBadge {
    pub article_id: String,
    pub label: BiasLabel,
    /// Confidence as a whole percentage.
    pub confidence: u8,
    pub reasoning: Option<String>,
}

/// A badge is shown only for labelled articles the service is confident about.
pub fn bias_badge(article: &Article, threshold: f32) -> Option<BiasBadge> {
    if !article.is_analyzed()
        || article.bias_label == BiasLabel::Unknown
        || article.bias_confidence < threshold
    {
        return None;
    }
    Some(BiasBadge {
        article_id: article.id.clone(),
        label: article.bias_label,
        confidence: (article.bias_confidence.clamp(0.0, 1.0) * 100.0).round() as u8,
        reasoning: article.bias_reasoning.clone(),
    })
}

pub fn truncate_keywords(keywords: &[String], limit: usize) -> &[String] {
    &keywords[..keywords.len().min(limit)]
}

/// Badge and shortened keywords for one compared article.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAnnotation {
    pub badge: Option<BiasBadge>,
    pub keywords: Vec<String>,
}

pub fn annotate(article: &Article, badge_threshold: f32, keyword_limit: usize) -> ArticleAnnotation {
    ArticleAnnotation {
        badge: bias_badge(article, badge_threshold),
        keywords: truncate_keywords(&article.keywords, keyword_limit).to_vec(),
    }
}

/// Newest first; undated articles go last. Use with a stable sort so ties keep their order.
pub fn compare_recency(a: &Article, b: &Article) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn leaning(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::Left => "left-leaning",
        Perspective::Center => "centrist",
        Perspective::Right => "right-leaning",
    }
}

/// Message naming the perspectives with no coverage.
///
/// Suppressed for synthesized one-article stories, which were never expected
/// to have several sources.
pub fn missing_perspectives_notice(breakdown: &CoverageBreakdown, synthesized: bool) -> Option<String> {
    if synthesized || breakdown.missing_biases.is_empty() {
        return None;
    }
    let names: Vec<&str> = breakdown.missing_biases.iter().map(|p| leaning(*p)).collect();
    let joined = match names.as_slice() {
        [only] => only.to_string(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
        [] => return None,
    };
    Some(format!("No {} coverage found", joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_badge_threshold() {
        let confident = Article::new("a", "A").with_bias(BiasLabel::Right, 0.64);
        let badge = bias_badge(&confident, DEFAULT_BADGE_THRESHOLD).unwrap();
        assert_eq!(badge.label, BiasLabel::Right);
        assert_eq!(badge.confidence, 64);

        let unsure = Article::new("b", "B").with_bias(BiasLabel::Right, 0.3);
        assert!(bias_badge(&unsure, DEFAULT_BADGE_THRESHOLD).is_none());

        let unknown = Article::new("c", "C").with_bias(BiasLabel::Unknown, 1.0);
        assert!(bias_badge(&unknown, DEFAULT_BADGE_THRESHOLD).is_none());

        let unanalyzed = Article::new("d", "D").with_bias(BiasLabel::Left, 0.0);
        assert!(bias_badge(&unanalyzed, 0.0).is_none());
        assert!(bias_badge(&confident, 0.0).is_some());
    }

    #[test]
    fn test_annotate() {
        let mut article = Article::new("a", "A").with_bias(BiasLabel::Center, 0.9);
        article.keywords = vec!["x".into(), "y".into()];
        let annotation = annotate(&article, DEFAULT_BADGE_THRESHOLD, 1);
        assert_eq!(annotation.keywords, vec!["x"]);
        assert_eq!(annotation.badge.unwrap().confidence, 90);
    }

    #[test]
    fn test_truncate_keywords() {
        let keywords: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(truncate_keywords(&keywords, 3).len(), 3);
        assert_eq!(truncate_keywords(&keywords[..1], 3), &keywords[..1]);
        assert!(truncate_keywords(&[], 3).is_empty());
    }

    #[test]
    fn test_compare_recency() {
        let old = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let mut articles = vec![
            Article::new("undated", "U"),
            Article::new("old", "O").with_published_at(old),
            Article::new("new", "N").with_published_at(new),
        ];
        articles.sort_by(compare_recency);
        let ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_missing_perspectives_notice() {
        let left = Article::new("1", "L").with_bias(BiasLabel::Left, 0.9);

        let breakdown = aggregate(&[left.clone()]);
        assert_eq!(
            missing_perspectives_notice(&breakdown, false).as_deref(),
            Some("No centrist or right-leaning coverage found")
        );
        assert!(missing_perspectives_notice(&breakdown, true).is_none());

        let empty = aggregate(&[]);
        assert_eq!(
            missing_perspectives_notice(&empty, false).as_deref(),
            Some("No left-leaning, centrist, or right-leaning coverage found")
        );

        let right = Article::new("2", "R").with_bias(BiasLabel::Right, 0.9);
        let center = Article::new("3", "C").with_bias(BiasLabel::Center, 0.9);
        let full = aggregate(&[left, right, center]);
        assert!(missing_perspectives_notice(&full, false).is_none());
    }
}
