use nt_core::{Article, BiasDistribution, Perspective, Story};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::{aggregate_with, CoverageBreakdown};
use crate::display::{annotate, missing_perspectives_notice, ArticleAnnotation};
use crate::CoverageConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySummary {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub category: Option<String>,
    pub synthesized: bool,
    pub bias_distribution: BiasDistribution,
}

impl From<&Story> for StorySummary {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id.clone(),
            headline: story.headline.clone(),
            summary: story.summary.clone(),
            category: story.category.clone(),
            synthesized: story.is_synthesized(),
            bias_distribution: story.bias_distribution,
        }
    }
}

/// Everything the three-column comparison view needs for one story.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub story: StorySummary,
    pub breakdown: CoverageBreakdown,
    pub percentages: BTreeMap<Perspective, f64>,
    pub notice: Option<String>,
    /// One entry per bucket article, in the same order as the bucket.
    pub annotations: BTreeMap<Perspective, Vec<ArticleAnnotation>>,
}

impl CoverageReport {
    pub fn for_story(story: &Story, config: &CoverageConfig) -> Self {
        let breakdown = aggregate_with(&story.articles, &config.policy);
        Self::build(StorySummary::from(story), breakdown, config)
    }

    /// Report over a loose article list that has no story behind it.
    pub fn for_articles(articles: &[Article], config: &CoverageConfig) -> Self {
        let summary = StorySummary {
            id: String::new(),
            headline: String::new(),
            summary: String::new(),
            category: None,
            synthesized: false,
            bias_distribution: BiasDistribution::from_articles(articles),
        };
        Self::build(summary, aggregate_with(articles, &config.policy), config)
    }

    /// Articles of one column paired with their annotations.
    pub fn column(&self, perspective: Perspective) -> impl Iterator<Item = (&Article, &ArticleAnnotation)> {
        let annotations = self
            .annotations
            .get(&perspective)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.breakdown.bucket(perspective).iter().zip(annotations.iter())
    }

    fn build(story: StorySummary, breakdown: CoverageBreakdown, config: &CoverageConfig) -> Self {
        let annotations: BTreeMap<Perspective, Vec<ArticleAnnotation>> = breakdown
            .by_bias
            .iter()
            .map(|(perspective, articles)| {
                let column: Vec<ArticleAnnotation> = articles
                    .iter()
                    .map(|a| annotate(a, config.badge_threshold, config.keyword_limit))
                    .collect();
                (*perspective, column)
            })
            .collect();

        Self {
            percentages: breakdown.percentages(),
            notice: missing_perspectives_notice(&breakdown, story.synthesized),
            annotations,
            story,
            breakdown,
        }
    }
}
