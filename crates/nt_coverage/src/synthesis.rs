use nt_core::{Article, Story, SYNTHESIZED_STORY_PREFIX};

/// Wraps an ungrouped article in a one-article story so it can go through the
/// comparison view. The id carries [`SYNTHESIZED_STORY_PREFIX`].
pub fn synthesize_story(article: &Article) -> Story {
    Story::new(
        format!("{}{}", SYNTHESIZED_STORY_PREFIX, article.id),
        article.title.clone(),
        article.summary.clone().unwrap_or_default(),
        None,
        vec![article.clone()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use nt_core::{BiasLabel, Perspective};

    #[test]
    fn test_synthesize_center_article() {
        let article = Article::new("abc", "Lone report").with_bias(BiasLabel::Center, 0.75);
        let story = synthesize_story(&article);

        assert_eq!(story.id, "single-abc");
        assert!(story.is_synthesized());
        assert_eq!(story.headline, "Lone report");
        assert_eq!(story.articles, vec![article.clone()]);
        assert_eq!(story.bias_distribution.center, 1);
        assert_eq!(story.bias_distribution.left, 0);
        assert_eq!(story.bias_distribution.right, 0);
        assert_eq!(story.bias_distribution.unknown, 0);

        let breakdown = aggregate(&story.articles);
        assert_eq!(breakdown.bucket(Perspective::Center), &[article.clone()]);
        assert_eq!(breakdown.missing_biases, vec![Perspective::Left, Perspective::Right]);
        assert_eq!(breakdown, aggregate(&[article]));
    }

    #[test]
    fn test_synthesize_unlabelled_article() {
        let mut article = Article::new("u1", "Unrated");
        article.summary = Some("Short synopsis".to_string());
        let story = synthesize_story(&article);

        assert_eq!(story.summary, "Short synopsis");
        assert_eq!(story.bias_distribution.unknown, 1);
        assert_eq!(story.bias_distribution.total(), 1);
        assert_eq!(story, synthesize_story(&article));
    }
}
