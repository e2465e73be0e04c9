//! Graph builder — assembles the four source collections into one
//! typed property graph.
//!
//! A pure function of its inputs: rebuilding from identical collections
//! yields identical node attributes and edge multisets. Only edge-list
//! order relative to map iteration is unspecified.

use esglink_core::types::{KnowledgeGraph, Node, NodeKind};

use crate::loader::SourceCollections;

/// Relation labels emitted by the builder. Callers may add their own.
pub const REPORTS_ON: &str = "reports_on";
pub const REPORTS_METRIC: &str = "reports_metric";
pub const MENTIONS: &str = "mentions";
pub const MENTIONS_COMPANY: &str = "mentions_company";

/// Build the knowledge graph from all four collections.
pub fn build_graph(sources: &SourceCollections) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    let company_names = add_companies(&mut graph, sources);
    add_reports(&mut graph, sources);
    add_news(&mut graph, sources, &company_names);
    add_social(&mut graph, sources);

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        companies = company_names.len(),
        "Knowledge graph assembled"
    );

    graph
}

/// One `Organization` node per company record. Returns the known company
/// names for the later mention scan.
fn add_companies(graph: &mut KnowledgeGraph, sources: &SourceCollections) -> Vec<String> {
    let mut names = Vec::new();

    for company in sources.companies.values().flatten() {
        let Some(name) = company.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };

        let mut node = Node::new(name, NodeKind::Organization)
            .with_domain("Corporate")
            .with_properties(company.identifiers.clone());
        if let Some(definition) = company.definition() {
            node = node.with_definition(definition);
        }

        graph.insert_node(node);
        names.push(name.to_string());
    }

    names
}

/// Reports contribute `ESGTopic` nodes per topic-breakdown entry and a
/// composite `Metric` node per metric key. Composite `<company>::<metric>`
/// keys keep the same metric name from different companies apart.
fn add_reports(graph: &mut KnowledgeGraph, sources: &SourceCollections) {
    for (filename, report) in &sources.reports {
        let Some(report) = report else { continue };
        let owner = report.owner_key(filename);

        for (category, topics) in &report.esg_topics {
            for topic in topics {
                graph.insert_node(Node::new(topic, NodeKind::EsgTopic).with_domain(category));
                graph.add_edge(&owner, topic, REPORTS_ON);
            }
        }

        for (metric, value) in &report.metrics {
            let key = format!("{owner}::{metric}");
            graph.insert_node(
                Node::new(&key, NodeKind::Metric)
                    .with_domain("Metric")
                    .with_definition(metric)
                    .with_property("value", value.clone()),
            );
            graph.add_edge(&owner, &key, REPORTS_METRIC);
        }
    }
}

/// News articles become nodes linked to their analysis topics, plus a
/// `mentions_company` edge for every known company name appearing in the
/// cleaned body text. The scan is O(articles × companies); fine at the
/// expected scale (hundreds of companies, low thousands of articles).
fn add_news(graph: &mut KnowledgeGraph, sources: &SourceCollections, company_names: &[String]) {
    let lowered: Vec<(String, &str)> = company_names
        .iter()
        .map(|name| (name.to_lowercase(), name.as_str()))
        .collect();

    for record in sources.news.values().flatten() {
        for source in &record.news_sources {
            for article in &source.articles {
                let Some(key) = article.node_key() else {
                    tracing::debug!("Skipping article without id or title");
                    continue;
                };

                let mut node = Node::new(&key, NodeKind::NewsArticle);
                if let Some(source_type) = &source.source_type {
                    node = node.with_domain(source_type);
                }
                if let Some(title) = &article.title {
                    node = node.with_definition(title);
                }
                graph.insert_node(node);

                for topic in &article.analysis.esg_topics {
                    graph.insert_node(
                        Node::new(topic, NodeKind::EsgTopic).with_domain("Environment"),
                    );
                    graph.add_edge(&key, topic, MENTIONS);
                }

                let body = article
                    .content_cleaned
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase();
                if body.is_empty() {
                    continue;
                }
                for (needle, name) in &lowered {
                    if body.contains(needle.as_str()) {
                        graph.add_edge(&key, name, MENTIONS_COMPANY);
                    }
                }
            }
        }
    }
}

/// Social posts mirror news articles minus the company scan: posts are
/// linked to topics only.
fn add_social(graph: &mut KnowledgeGraph, sources: &SourceCollections) {
    for record in sources.social.values().flatten() {
        for platform in &record.platforms {
            for post in &platform.posts {
                let Some(key) = post.node_key() else {
                    tracing::debug!("Skipping post without id or content");
                    continue;
                };

                let mut node = Node::new(&key, NodeKind::SocialPost);
                if let Some(name) = &platform.platform {
                    node = node.with_domain(name);
                }
                if let Some(snippet) = post.snippet() {
                    node = node.with_definition(snippet);
                }
                graph.insert_node(node);

                for topic in &post.analysis.esg_topics {
                    graph.insert_node(
                        Node::new(topic, NodeKind::EsgTopic).with_domain("Environment"),
                    );
                    graph.add_edge(&key, topic, MENTIONS);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Collection;
    use crate::records::{CompanyRecord, NewsRecord, ReportRecord, SocialRecord};
    use esglink_store::GraphDocument;
    use serde_json::json;

    fn collection<T>(entries: Vec<(&str, Option<T>)>) -> Collection<T> {
        entries
            .into_iter()
            .map(|(name, record)| (name.to_string(), record))
            .collect()
    }

    fn company(name: &str) -> CompanyRecord {
        serde_json::from_value(json!({
            "name": name,
            "sector": "Industrials",
            "identifiers": { "ticker": "ACM" }
        }))
        .unwrap()
    }

    fn sample_sources() -> SourceCollections {
        let report: ReportRecord = serde_json::from_value(json!({
            "company": "Acme",
            "metrics": { "co2_scope1_tonnes": 1000 },
            "esg_topics": { "Environment": ["Climate Change", "Water Use"] }
        }))
        .unwrap();

        let news: NewsRecord = serde_json::from_value(json!({
            "news_sources": [{
                "source_type": "newswire",
                "articles": [{
                    "title": "Acme cuts emissions",
                    "content_cleaned": "Today ACME announced cuts. Globex declined to comment.",
                    "analysis": { "sentiment": 0.5, "esg_topics": ["Climate Change"] }
                }]
            }]
        }))
        .unwrap();

        let social: SocialRecord = serde_json::from_value(json!({
            "platforms": [{
                "platform": "mastodon",
                "posts": [{
                    "post_id": "p-001",
                    "content_raw": "Acme is greenwashing again",
                    "analysis": { "sentiment": -0.4, "esg_topics": ["Greenwashing"] }
                }]
            }]
        }))
        .unwrap();

        SourceCollections {
            companies: collection(vec![
                ("acme.json", Some(company("Acme"))),
                ("globex.json", Some(company("Globex"))),
                ("broken.json", None),
            ]),
            reports: collection(vec![("acme_2023.json", Some(report))]),
            news: collection(vec![("acme_news.json", Some(news))]),
            social: collection(vec![("acme_social.json", Some(social))]),
        }
    }

    #[test]
    fn companies_become_organization_nodes() {
        let graph = build_graph(&sample_sources());
        let acme = graph.node("Acme").unwrap();
        assert_eq!(acme.kind, NodeKind::Organization);
        assert_eq!(acme.domain.as_deref(), Some("Corporate"));
        assert_eq!(acme.definition.as_deref(), Some("Industrials"));
        assert_eq!(acme.properties.get("ticker"), Some(&json!("ACM")));
    }

    #[test]
    fn report_metric_scenario() {
        let graph = build_graph(&sample_sources());

        let metric = graph.node("Acme::co2_scope1_tonnes").unwrap();
        assert_eq!(metric.kind, NodeKind::Metric);
        assert_eq!(metric.properties.get("value"), Some(&json!(1000)));

        assert!(has_edge(&graph, "Acme", "Acme::co2_scope1_tonnes", REPORTS_METRIC));
    }

    #[test]
    fn report_topics_link_with_category_domain() {
        let graph = build_graph(&sample_sources());

        let topic = graph.node("Water Use").unwrap();
        assert_eq!(topic.kind, NodeKind::EsgTopic);
        assert_eq!(topic.domain.as_deref(), Some("Environment"));
        assert!(has_edge(&graph, "Acme", "Climate Change", REPORTS_ON));
        assert!(has_edge(&graph, "Acme", "Water Use", REPORTS_ON));
    }

    #[test]
    fn composite_metric_keys_do_not_collide_across_companies() {
        let mut sources = sample_sources();
        let globex_report: ReportRecord = serde_json::from_value(json!({
            "company": "Globex",
            "metrics": { "co2_scope1_tonnes": 777 }
        }))
        .unwrap();
        sources
            .reports
            .insert("globex_2023.json".to_string(), Some(globex_report));

        let graph = build_graph(&sources);
        assert_eq!(
            graph.node("Acme::co2_scope1_tonnes").unwrap().properties["value"],
            json!(1000)
        );
        assert_eq!(
            graph.node("Globex::co2_scope1_tonnes").unwrap().properties["value"],
            json!(777)
        );
    }

    #[test]
    fn news_articles_mention_topics_and_companies() {
        let graph = build_graph(&sample_sources());
        let key = "article::Acme cuts emissions";

        let article = graph.node(key).unwrap();
        assert_eq!(article.kind, NodeKind::NewsArticle);
        assert_eq!(article.domain.as_deref(), Some("newswire"));

        assert!(has_edge(&graph, key, "Climate Change", MENTIONS));
        // Case-insensitive substring scan finds both companies.
        assert!(has_edge(&graph, key, "Acme", MENTIONS_COMPANY));
        assert!(has_edge(&graph, key, "Globex", MENTIONS_COMPANY));
    }

    #[test]
    fn social_posts_link_topics_but_never_companies() {
        let graph = build_graph(&sample_sources());
        let key = "post::p-001";

        let post = graph.node(key).unwrap();
        assert_eq!(post.kind, NodeKind::SocialPost);
        assert_eq!(post.domain.as_deref(), Some("mastodon"));
        assert_eq!(post.definition.as_deref(), Some("Acme is greenwashing again"));

        assert!(has_edge(&graph, key, "Greenwashing", MENTIONS));
        // Deliberate asymmetry: the post body names Acme, yet no
        // mentions_company edge is emitted for posts.
        let company_mentions = graph
            .edges()
            .iter()
            .filter(|e| {
                e.relation == MENTIONS_COMPANY
                    && graph.edge_endpoints(e).is_some_and(|(s, _)| s == key)
            })
            .count();
        assert_eq!(company_mentions, 0);
    }

    #[test]
    fn report_owner_without_company_record_creates_dangling_edges() {
        let orphan: ReportRecord = serde_json::from_value(json!({
            "metrics": { "waste_tonnes": 5 }
        }))
        .unwrap();
        let sources = SourceCollections {
            reports: collection(vec![("mystery_2022.json", Some(orphan))]),
            ..Default::default()
        };

        let graph = build_graph(&sources);
        // Owner key falls back to the filename prefix; no Organization
        // node exists for it, the edge dangles.
        assert!(graph.node("mystery").is_none());
        assert!(has_edge(&graph, "mystery", "mystery::waste_tonnes", REPORTS_METRIC));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let sources = sample_sources();
        let first = GraphDocument::from_graph(&build_graph(&sources));
        let second = GraphDocument::from_graph(&build_graph(&sources));
        assert_eq!(first.nodes, second.nodes);

        let mut a = first.edges.clone();
        let mut b = second.edges.clone();
        let key = |e: &esglink_store::EdgeRecord| {
            (e.source.clone(), e.target.clone(), e.relation.clone())
        };
        a.sort_by_key(key);
        b.sort_by_key(key);
        assert_eq!(a, b);
    }

    #[test]
    fn null_records_contribute_nothing() {
        let sources = SourceCollections {
            companies: collection::<CompanyRecord>(vec![("bad.json", None)]),
            reports: collection::<ReportRecord>(vec![("bad.json", None)]),
            news: collection::<NewsRecord>(vec![("bad.json", None)]),
            social: collection::<SocialRecord>(vec![("bad.json", None)]),
        };
        assert!(build_graph(&sources).is_empty());
    }

    fn has_edge(graph: &KnowledgeGraph, source: &str, target: &str, relation: &str) -> bool {
        graph.edges().iter().any(|e| {
            e.relation == relation
                && graph.edge_endpoints(e) == Some((source, target))
        })
    }
}
