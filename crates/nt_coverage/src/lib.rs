//! Coverage comparison for news stories: buckets a story's articles by bias
//! label and reports which perspectives are missing.

use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod display;
pub mod report;
pub mod service;
pub mod synthesis;

pub use aggregate::{aggregate, aggregate_with, AggregationPolicy, CoverageBreakdown};
pub use report::{CoverageReport, StorySummary};
pub use service::CoverageService;
pub use synthesis::synthesize_story;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageConfig {
    pub policy: AggregationPolicy,
    /// Minimum confidence for an article to show a bias badge.
    pub badge_threshold: f32,
    pub keyword_limit: usize,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            policy: AggregationPolicy::default(),
            badge_threshold: display::DEFAULT_BADGE_THRESHOLD,
            keyword_limit: display::DEFAULT_KEYWORD_LIMIT,
        }
    }
}

impl CoverageConfig {
    pub fn validate(&self) -> nt_core::Result<()> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if let Some(min) = self.policy.min_confidence {
            if !in_unit(min) {
                return Err(nt_core::Error::Config(format!(
                    "min confidence must be within [0, 1], got {}",
                    min
                )));
            }
        }
        if !in_unit(self.badge_threshold) {
            return Err(nt_core::Error::Config(format!(
                "badge threshold must be within [0, 1], got {}",
                self.badge_threshold
            )));
        }
        Ok(())
    }
}

pub mod prelude {
    pub use super::{aggregate, synthesize_story, CoverageConfig, CoverageReport, CoverageService};
    pub use nt_core::{Article, BiasLabel, Perspective, Result, Story};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(CoverageConfig::default().validate().is_ok());

        let config = CoverageConfig {
            policy: AggregationPolicy::with_min_confidence(1.5),
            ..CoverageConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CoverageConfig {
            badge_threshold: -0.1,
            ..CoverageConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
