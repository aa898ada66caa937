use nt_core::{BiasLabel, Perspective};
use nt_coverage::display::compare_recency;
use nt_coverage::CoverageReport;
use std::fmt::Write;

fn heading(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::Left => "LEFT",
        Perspective::Center => "CENTER",
        Perspective::Right => "RIGHT",
    }
}

/// Plain-text rendering of a coverage report, one block per column.
pub fn render_report(report: &CoverageReport) -> String {
    let mut out = String::new();
    let story = &report.story;

    if !story.id.is_empty() {
        let _ = writeln!(out, "📰 {} [{}]", story.headline, story.id);
        if let Some(category) = &story.category {
            let _ = writeln!(out, "   category: {}", category);
        }
        if !story.summary.is_empty() {
            let _ = writeln!(out, "   {}", story.summary);
        }
        let counts: Vec<String> = BiasLabel::ALL
            .iter()
            .map(|label| format!("{} {}", label, story.bias_distribution.get(*label)))
            .collect();
        let _ = writeln!(out, "   articles by label: {}", counts.join(", "));
        if story.synthesized {
            let _ = writeln!(out, "   (single article, not grouped into a story yet)");
        }
    }

    let breakdown = &report.breakdown;
    let _ = writeln!(
        out,
        "\n{} articles compared, {} without a usable bias label",
        breakdown.total_articles, breakdown.unclassified
    );

    for perspective in Perspective::ALL {
        let _ = writeln!(
            out,
            "\n{}: {} ({:.0}%)",
            heading(perspective),
            breakdown.count(perspective),
            breakdown.percentage(perspective)
        );
        let mut entries: Vec<_> = report.column(perspective).collect();
        entries.sort_by(|(a, _), (b, _)| compare_recency(a, b));
        for (article, annotation) in entries {
            let _ = write!(out, "  • {} ({})", article.title, article.source_name());
            if let Some(badge) = &annotation.badge {
                let _ = write!(out, " [{} {}%]", badge.label, badge.confidence);
            }
            if !annotation.keywords.is_empty() {
                let _ = write!(out, " #{}", annotation.keywords.join(" #"));
            }
            out.push('\n');
        }
    }

    if let Some(notice) = &report.notice {
        let _ = writeln!(out, "\n⚠️ {}", notice);
    }
    out
}
