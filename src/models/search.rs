use serde::{Deserialize, Serialize};

/// The content types the site search covers.
///
/// Declaration order is the order kinds are concatenated in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Services,
    News,
    Jobs,
    Faq,
}

impl ResultKind {
    pub const ALL: [ResultKind; 4] = [
        ResultKind::Services,
        ResultKind::News,
        ResultKind::Jobs,
        ResultKind::Faq,
    ];

    /// Prefix shown in front of a result title.
    pub fn prefix(&self) -> &'static str {
        match self {
            ResultKind::Services => "Услуга",
            ResultKind::News => "Новость",
            ResultKind::Jobs => "Вакансия",
            ResultKind::Faq => "FAQ",
        }
    }

    /// Heading for a group of results in the assistant widget.
    pub fn heading(&self) -> &'static str {
        match self {
            ResultKind::Services => "Услуги",
            ResultKind::News => "Новости",
            ResultKind::Jobs => "Вакансии",
            ResultKind::Faq => "Вопросы и ответы",
        }
    }

    /// Parse a kind from its wire name (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "services" | "service" => Some(ResultKind::Services),
            "news" => Some(ResultKind::News),
            "jobs" | "job" => Some(ResultKind::Jobs),
            "faq" | "faqs" => Some(ResultKind::Faq),
            _ => None,
        }
    }

    /// Navigation target for a matched record. Only services have detail pages.
    pub fn href(&self, id: &str) -> String {
        match self {
            ResultKind::Services => format!("/services/{}", id),
            ResultKind::News => "/news".to_string(),
            ResultKind::Jobs => "/jobs".to_string(),
            ResultKind::Faq => "/faq".to_string(),
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub kind: ResultKind,
    /// Kind-prefixed display title, e.g. `Услуга: Получение паспорта`.
    pub title: String,
    /// The record's own title (or question, for FAQ).
    pub label: String,
    pub href: String,
}

impl SearchResult {
    pub fn new(kind: ResultKind, id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: format!("{}: {}", kind.prefix(), label),
            label: label.to_string(),
            href: kind.href(id),
        }
    }
}

/// Response body of `GET /api/search`.
///
/// `faq` is only present when FAQ is part of the endpoint's source set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedResults {
    pub services: Vec<SearchResult>,
    pub news: Vec<SearchResult>,
    pub jobs: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faq: Option<Vec<SearchResult>>,
}

impl GroupedResults {
    /// Empty groups for the given source set.
    pub fn empty(include_faq: bool) -> Self {
        Self {
            faq: include_faq.then(Vec::new),
            ..Self::default()
        }
    }

    /// Distribute a flat, kind-ordered result list into groups.
    pub fn from_results(results: Vec<SearchResult>, include_faq: bool) -> Self {
        let mut grouped = Self::empty(include_faq);
        for result in results {
            match result.kind {
                ResultKind::Services => grouped.services.push(result),
                ResultKind::News => grouped.news.push(result),
                ResultKind::Jobs => grouped.jobs.push(result),
                ResultKind::Faq => {
                    if let Some(faq) = grouped.faq.as_mut() {
                        faq.push(result);
                    }
                }
            }
        }
        grouped
    }

    /// Groups in display order, skipping absent ones.
    pub fn groups(&self) -> Vec<(ResultKind, &[SearchResult])> {
        let mut groups = vec![
            (ResultKind::Services, self.services.as_slice()),
            (ResultKind::News, self.news.as_slice()),
            (ResultKind::Jobs, self.jobs.as_slice()),
        ];
        if let Some(faq) = &self.faq {
            groups.push((ResultKind::Faq, faq.as_slice()));
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(|(_, items)| items.is_empty())
    }

    pub fn len(&self) -> usize {
        self.groups().iter().map(|(_, items)| items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_title_and_href() {
        let hit = SearchResult::new(ResultKind::Services, "1", "Получение паспорта");
        assert_eq!(hit.title, "Услуга: Получение паспорта");
        assert_eq!(hit.href, "/services/1");

        let news = SearchResult::new(ResultKind::News, "9", "Открытие центра");
        assert_eq!(news.href, "/news");
    }

    #[test]
    fn test_empty_groups_wire_format() {
        let json = serde_json::to_value(GroupedResults::empty(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "services": [], "news": [], "jobs": [] }));

        let json = serde_json::to_value(GroupedResults::empty(true)).unwrap();
        assert_eq!(json["faq"], serde_json::json!([]));
    }

    #[test]
    fn test_from_results_drops_faq_when_excluded() {
        let results = vec![
            SearchResult::new(ResultKind::Jobs, "1", "Юрист"),
            SearchResult::new(ResultKind::Faq, "2", "Как войти?"),
        ];
        let grouped = GroupedResults::from_results(results, false);
        assert_eq!(grouped.jobs.len(), 1);
        assert!(grouped.faq.is_none());
        assert_eq!(grouped.len(), 1);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(ResultKind::from_str_ci("FAQ"), Some(ResultKind::Faq));
        assert_eq!(ResultKind::from_str_ci(" services "), Some(ResultKind::Services));
        assert_eq!(ResultKind::from_str_ci("treasury"), None);
    }

    #[test]
    fn test_kind_order_is_concatenation_order() {
        let mut kinds = vec![
            ResultKind::Faq,
            ResultKind::Services,
            ResultKind::Jobs,
            ResultKind::News,
        ];
        kinds.sort();
        assert_eq!(kinds, ResultKind::ALL.to_vec());
    }
}
