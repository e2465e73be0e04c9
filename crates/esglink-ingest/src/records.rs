//! Typed input records for the four source collections.
//!
//! Every field defaults so that arbitrarily shaped documents deserialize
//! as far as they can; unknown fields are ignored. Fields that appear as
//! either strings or numbers in the wild are held as raw JSON values and
//! stringified on access.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A company profile document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyRecord {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub identifiers: serde_json::Map<String, Value>,
}

impl CompanyRecord {
    /// Human-readable definition: description, falling back to sector.
    pub fn definition(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.sector.as_deref())
    }
}

/// A sustainability report document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportRecord {
    pub company: Option<Value>,
    pub company_id: Option<Value>,
    pub year: Option<i32>,
    pub metrics: BTreeMap<String, Value>,
    pub esg_topics: BTreeMap<String, Vec<String>>,
    pub claims: Value,
    pub framework_alignment: Value,
}

impl ReportRecord {
    /// Resolve the owning company key: explicit company field, else the
    /// company ID, else the report's filename prefix before the first `_`.
    pub fn owner_key(&self, filename: &str) -> String {
        if let Some(key) = self.company.as_ref().and_then(loose_string) {
            return key;
        }
        if let Some(key) = self.company_id.as_ref().and_then(loose_string) {
            return key;
        }
        filename.split('_').next().unwrap_or(filename).to_string()
    }
}

/// A news document: articles grouped by source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsRecord {
    pub news_sources: Vec<NewsSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsSource {
    pub source_name: Option<String>,
    pub source_type: Option<String>,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Article {
    pub article_id: Option<String>,
    pub title: Option<String>,
    pub published_date: Option<String>,
    pub content_cleaned: Option<String>,
    pub analysis: Analysis,
}

impl Article {
    /// Synthetic node key: `article::<id-or-title-prefix>`. Articles with
    /// neither an ID nor a title cannot be keyed and are skipped.
    pub fn node_key(&self) -> Option<String> {
        if let Some(id) = self.article_id.as_deref().filter(|s| !s.is_empty()) {
            return Some(format!("article::{id}"));
        }
        let title = self.title.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("article::{}", char_prefix(title, 60)))
    }
}

/// Sentiment/topic analysis attached to an article, post, or comment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub sentiment: Option<f64>,
    pub esg_topics: Vec<String>,
}

/// A social-media document: posts grouped by platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SocialRecord {
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub platform: Option<String>,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Post {
    pub post_id: Option<String>,
    pub content_raw: Option<String>,
    pub analysis: Analysis,
    pub comments: Vec<Comment>,
}

impl Post {
    /// Synthetic node key: `post::<id-or-content-prefix>`.
    pub fn node_key(&self) -> Option<String> {
        if let Some(id) = self.post_id.as_deref().filter(|s| !s.is_empty()) {
            return Some(format!("post::{id}"));
        }
        let content = self.content_raw.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("post::{}", char_prefix(content, 40)))
    }

    /// Display snippet for the node definition.
    pub fn snippet(&self) -> Option<String> {
        self.content_raw
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| char_prefix(s, 140))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub analysis: Analysis,
}

/// Stringify values that show up as either strings or numbers.
fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Character-safe prefix (keys must not split a multi-byte character).
fn char_prefix(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
