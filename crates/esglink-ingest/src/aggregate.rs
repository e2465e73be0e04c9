//! Dashboard rollups over the raw source collections.
//!
//! These operate on the typed records directly rather than the graph, so
//! they stay available even when graph construction is skipped.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::loader::SourceCollections;

/// Mean of the present values; `None` when nothing is present.
pub fn mean_sentiment<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (mut sum, mut count) = (0.0, 0u32);
    for value in values.into_iter().flatten() {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / f64::from(count))
}

/// Mean sentiment across every analyzed news article.
pub fn news_sentiment(sources: &SourceCollections) -> Option<f64> {
    mean_sentiment(
        sources
            .news
            .values()
            .flatten()
            .flat_map(|r| &r.news_sources)
            .flat_map(|s| &s.articles)
            .map(|a| a.analysis.sentiment),
    )
}

/// Mean sentiment across social posts and their comments, weighted
/// equally per analyzed item.
pub fn social_sentiment(sources: &SourceCollections) -> Option<f64> {
    mean_sentiment(
        sources
            .social
            .values()
            .flatten()
            .flat_map(|r| &r.platforms)
            .flat_map(|p| &p.posts)
            .flat_map(|post| {
                std::iter::once(post.analysis.sentiment)
                    .chain(post.comments.iter().map(|c| c.analysis.sentiment))
            }),
    )
}

/// A topic and how many times it was tagged across all collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

/// Tag frequencies across report breakdowns, article analyses, and
/// post-level analyses. Comments feed the sentiment rollup only, never
/// the tally. Sorted by count descending, then topic name ascending.
pub fn topic_counts(sources: &SourceCollections) -> Vec<TopicCount> {
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    let mut add = |topic: &String| {
        if !topic.is_empty() {
            *tally.entry(topic.clone()).or_default() += 1;
        }
    };

    for report in sources.reports.values().flatten() {
        for topics in report.esg_topics.values() {
            topics.iter().for_each(&mut add);
        }
    }
    for record in sources.news.values().flatten() {
        for source in &record.news_sources {
            for article in &source.articles {
                article.analysis.esg_topics.iter().for_each(&mut add);
            }
        }
    }
    for record in sources.social.values().flatten() {
        for platform in &record.platforms {
            for post in &platform.posts {
                post.analysis.esg_topics.iter().for_each(&mut add);
            }
        }
    }

    let mut out: Vec<TopicCount> = tally
        .into_iter()
        .map(|(topic, count)| TopicCount { topic, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    out
}
