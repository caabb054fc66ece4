use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::content::collection::Collection;
use crate::content::fallback::Fallback;
use crate::db::models::{FaqEntry, JobPosting, NewsItem, Service};
use crate::error::AppError;
use crate::models::search::{ResultKind, SearchResult};

/// A content record the site search can match.
pub trait Searchable: Fallback {
    const KIND: ResultKind;

    /// Text shown for a hit (title, or question for FAQ).
    fn label(&self) -> &str;

    /// The fields a query is matched against.
    fn haystacks(&self) -> [&str; 2];

    /// Whether `needle` (already trimmed and lowercased) occurs in any field.
    fn matches(&self, needle: &str) -> bool {
        self.haystacks()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for Service {
    const KIND: ResultKind = ResultKind::Services;

    fn label(&self) -> &str {
        &self.title
    }

    fn haystacks(&self) -> [&str; 2] {
        [&self.title, &self.description]
    }
}

impl Searchable for NewsItem {
    const KIND: ResultKind = ResultKind::News;

    fn label(&self) -> &str {
        &self.title
    }

    fn haystacks(&self) -> [&str; 2] {
        [&self.title, &self.summary]
    }
}

impl Searchable for JobPosting {
    const KIND: ResultKind = ResultKind::Jobs;

    fn label(&self) -> &str {
        &self.title
    }

    fn haystacks(&self) -> [&str; 2] {
        [&self.title, &self.description]
    }
}

impl Searchable for FaqEntry {
    const KIND: ResultKind = ResultKind::Faq;

    fn label(&self) -> &str {
        &self.question
    }

    fn haystacks(&self) -> [&str; 2] {
        [&self.question, &self.answer]
    }
}

/// One branch of the search fan-out.
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn kind(&self) -> ResultKind;

    /// Matches for a normalized query, in the source's listing order.
    async fn matching(&self, needle: &str) -> Result<Vec<SearchResult>, AppError>;
}

#[async_trait]
impl<T: Searchable> SearchSource for Collection<T> {
    fn kind(&self) -> ResultKind {
        T::KIND
    }

    async fn matching(&self, needle: &str) -> Result<Vec<SearchResult>, AppError> {
        let records = self.all().await?;
        Ok(records
            .iter()
            .filter(|record| record.matches(needle))
            .map(|record| SearchResult::new(T::KIND, record.id(), record.label()))
            .collect())
    }
}

/// Which sources to query and how many hits to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub sources: Vec<ResultKind>,
    /// Cap applied to each kind before concatenation.
    pub per_kind_limit: Option<usize>,
    /// Cap applied to the concatenated list.
    pub total_limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sources: ResultKind::ALL.to_vec(),
            per_kind_limit: None,
            total_limit: None,
        }
    }
}

/// Trim and case-fold a query. An empty result means "no search".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Fans a query out to every selected source and merges the matches.
pub struct SearchAggregator {
    sources: Vec<Arc<dyn SearchSource>>,
}

impl SearchAggregator {
    pub fn new(mut sources: Vec<Arc<dyn SearchSource>>) -> Self {
        sources.sort_by_key(|s| s.kind());
        Self { sources }
    }

    /// Substring search across the selected sources.
    ///
    /// Results are grouped by kind in the order services, news, jobs, FAQ.
    /// Any failing source makes the whole search return nothing.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        let needle = normalize_query(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let selected: Vec<&Arc<dyn SearchSource>> = self
            .sources
            .iter()
            .filter(|s| options.sources.contains(&s.kind()))
            .collect();

        let outcomes = join_all(selected.iter().map(|s| s.matching(&needle))).await;

        let mut results = Vec::new();
        for (source, outcome) in selected.iter().zip(outcomes) {
            match outcome {
                Ok(mut hits) => {
                    if let Some(limit) = options.per_kind_limit {
                        hits.truncate(limit);
                    }
                    results.extend(hits);
                }
                Err(err) => {
                    tracing::error!(
                        kind = ?source.kind(),
                        error = %err,
                        "Search source failed, returning no results"
                    );
                    return Vec::new();
                }
            }
        }

        if let Some(limit) = options.total_limit {
            results.truncate(limit);
        }

        tracing::debug!(query = %needle, hits = results.len(), "Search completed");
        results
    }
}
