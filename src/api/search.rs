use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::config::SearchConfig;
use crate::models::search::{GroupedResults, ResultKind};
use crate::search::aggregator::{SearchAggregator, SearchOptions};
use crate::state::AppState;

/// Query parameters of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    /// Comma-separated kinds, e.g. `services,faq`. Unknown names are ignored.
    #[serde(default)]
    pub sources: Option<String>,
}

/// Parse a comma-separated source list, dropping unknown and repeated kinds.
pub fn parse_sources(raw: &str) -> Vec<ResultKind> {
    let mut kinds: Vec<ResultKind> = raw.split(',').filter_map(ResultKind::from_str_ci).collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

/// Run an endpoint search and group the hits by kind.
///
/// A missing or blank query returns empty groups without searching.
pub async fn process_search(
    aggregator: &SearchAggregator,
    config: &SearchConfig,
    params: SearchQuery,
) -> GroupedResults {
    let sources = params
        .sources
        .as_deref()
        .map(parse_sources)
        .filter(|kinds| !kinds.is_empty())
        .unwrap_or_else(|| config.endpoint_sources.clone());
    let include_faq = sources.contains(&ResultKind::Faq);

    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return GroupedResults::empty(include_faq);
    }

    let options = SearchOptions {
        sources,
        per_kind_limit: Some(config.endpoint_limit),
        total_limit: None,
    };
    let results = aggregator.search(&query, &options).await;
    GroupedResults::from_results(results, include_faq)
}

/// Query parameters of `GET /api/search/widget`.
#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Run a widget search: the widget's sources, the endpoint's per-kind cap
/// and the widget's total cap.
pub async fn process_widget_search(
    aggregator: &SearchAggregator,
    config: &SearchConfig,
    params: WidgetQuery,
) -> GroupedResults {
    let include_faq = config.widget_sources.contains(&ResultKind::Faq);

    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return GroupedResults::empty(include_faq);
    }

    let options = SearchOptions {
        sources: config.widget_sources.clone(),
        per_kind_limit: Some(config.endpoint_limit),
        total_limit: Some(config.widget_limit),
    };
    let results = aggregator.search(&query, &options).await;
    GroupedResults::from_results(results, include_faq)
}

/// `GET /api/search?q=<text>[&sources=<kinds>]`
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<GroupedResults> {
    Json(process_search(&state.search, &state.search_config, params).await)
}

/// `GET /api/search/widget?q=<text>`
pub async fn widget_search_handler(
    State(state): State<AppState>,
    Query(params): Query<WidgetQuery>,
) -> Json<GroupedResults> {
    Json(process_widget_search(&state.search, &state.search_config, params).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::collection::Collection;
    use crate::content::fallback::Fallback;
    use crate::content::reader::ReaderOptions;
    use crate::db::memory::InMemoryRepository;
    use crate::db::models::{FaqEntry, JobPosting, NewsItem, Service};
    use crate::search::aggregator::SearchSource;
    use std::sync::Arc;

    fn seeded_aggregator() -> SearchAggregator {
        fn source<T: crate::search::aggregator::Searchable>() -> Arc<dyn SearchSource> {
            Arc::new(Collection::new(
                Arc::new(InMemoryRepository::with_records(T::fallback())),
                ReaderOptions::default(),
            ))
        }
        SearchAggregator::new(vec![
            source::<Service>(),
            source::<NewsItem>(),
            source::<JobPosting>(),
            source::<FaqEntry>(),
        ])
    }

    fn query(q: Option<&str>, sources: Option<&str>) -> SearchQuery {
        SearchQuery {
            q: q.map(str::to_string),
            sources: sources.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_sources() {
        assert_eq!(
            parse_sources("faq, Services,bogus,faq"),
            vec![ResultKind::Services, ResultKind::Faq]
        );
        assert!(parse_sources("").is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_returns_empty_groups() {
        let agg = seeded_aggregator();
        let config = SearchConfig::default();

        for q in [None, Some(""), Some("   ")] {
            let grouped = process_search(&agg, &config, query(q, None)).await;
            assert!(grouped.is_empty());
            assert!(grouped.faq.is_none());
        }
    }

    #[tokio::test]
    async fn test_default_sources_exclude_faq() {
        let agg = seeded_aggregator();
        let config = SearchConfig::default();

        let grouped = process_search(&agg, &config, query(Some("портал"), None)).await;
        assert!(grouped.faq.is_none());

        let grouped =
            process_search(&agg, &config, query(Some("портал"), Some("services,faq"))).await;
        assert_eq!(grouped.faq.map(|f| f.len()), Some(1));
        assert!(grouped.news.is_empty());
    }

    #[tokio::test]
    async fn test_groups_capped_per_kind() {
        let agg = seeded_aggregator();
        let config = SearchConfig::default();

        // A single common letter matches every seeded record
        let grouped = process_search(&agg, &config, query(Some("о"), None)).await;
        assert_eq!(grouped.services.len(), 3);
        assert_eq!(grouped.news.len(), 3);
        assert_eq!(grouped.jobs.len(), 3);
    }

    #[tokio::test]
    async fn test_widget_search_caps_total_in_kind_order() {
        let agg = seeded_aggregator();
        let config = SearchConfig::default();

        let grouped = process_widget_search(
            &agg,
            &config,
            WidgetQuery {
                q: Some("о".to_string()),
            },
        )
        .await;
        assert_eq!(grouped.len(), 5);
        assert_eq!(grouped.services.len(), 3);
        assert_eq!(grouped.news.len(), 2);
        assert!(grouped.jobs.is_empty());
        assert_eq!(grouped.faq.map(|f| f.len()), Some(0));
    }

    #[tokio::test]
    async fn test_widget_limit_comes_from_config() {
        let agg = seeded_aggregator();
        let config = SearchConfig {
            widget_limit: 2,
            ..SearchConfig::default()
        };

        let grouped = process_widget_search(
            &agg,
            &config,
            WidgetQuery {
                q: Some("о".to_string()),
            },
        )
        .await;
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.services.len(), 2);
    }
}
