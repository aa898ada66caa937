//! Bucketing of a story's articles into the left / center / right comparison columns.

use nt_core::{Article, Perspective};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which labelled articles count toward their bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationPolicy {
    /// Articles with a bias confidence below this value are treated as unknown.
    /// `None` keeps every labelled article.
    pub min_confidence: Option<f32>,
}

impl AggregationPolicy {
    pub fn with_min_confidence(min_confidence: f32) -> Self {
        Self {
            min_confidence: Some(min_confidence),
        }
    }

    /// The column an article lands in, or `None` when it is dropped.
    pub fn classify(&self, article: &Article) -> Option<Perspective> {
        let perspective = article.bias_label.perspective()?;
        match self.min_confidence {
            Some(threshold) if article.bias_confidence < threshold => None,
            _ => Some(perspective),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageBreakdown {
    pub by_bias: BTreeMap<Perspective, Vec<Article>>,
    pub total_articles: usize,
    pub missing_biases: Vec<Perspective>,
    /// Articles left out of every column (unknown label or below the confidence threshold).
    pub unclassified: usize,
}

impl CoverageBreakdown {
    pub fn bucket(&self, perspective: Perspective) -> &[Article] {
        self.by_bias
            .get(&perspective)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count(&self, perspective: Perspective) -> usize {
        self.bucket(perspective).len()
    }

    pub fn is_missing(&self, perspective: Perspective) -> bool {
        self.missing_biases.contains(&perspective)
    }

    /// Share of the compared articles in one column, in `[0, 100]`.
    pub fn percentage(&self, perspective: Perspective) -> f64 {
        if self.total_articles == 0 {
            return 0.0;
        }
        100.0 * self.count(perspective) as f64 / self.total_articles as f64
    }

    pub fn percentages(&self) -> BTreeMap<Perspective, f64> {
        Perspective::ALL
            .iter()
            .map(|p| (*p, self.percentage(*p)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_articles == 0
    }
}

/// Groups articles into the three comparison columns, keeping every labelled article.
pub fn aggregate(articles: &[Article]) -> CoverageBreakdown {
    aggregate_with(articles, &AggregationPolicy::default())
}

/// Groups articles into the three comparison columns under `policy`.
///
/// Never fails: unknown labels are dropped and counted in `unclassified`.
/// Within a column articles keep their input order.
pub fn aggregate_with(articles: &[Article], policy: &AggregationPolicy) -> CoverageBreakdown {
    let mut by_bias: BTreeMap<Perspective, Vec<Article>> =
        Perspective::ALL.iter().map(|p| (*p, Vec::new())).collect();
    let mut unclassified = 0;

    for article in articles {
        match policy.classify(article) {
            Some(perspective) => by_bias.entry(perspective).or_default().push(article.clone()),
            None => unclassified += 1,
        }
    }

    let total_articles = by_bias.values().map(Vec::len).sum();
    let missing_biases = Perspective::ALL
        .iter()
        .copied()
        .filter(|p| by_bias.get(p).map_or(true, Vec::is_empty))
        .collect();

    CoverageBreakdown {
        by_bias,
        total_articles,
        missing_biases,
        unclassified,
    }
}
