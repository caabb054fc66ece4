//! Views over cached listings used by the public pages.

use serde::Serialize;

use crate::db::models::{GovernmentMember, NewsItem, Service};

/// The `limit` most viewed services. Ties keep listing order.
pub fn popular_services(services: &[Service], limit: usize) -> Vec<Service> {
    let mut popular = services.to_vec();
    popular.sort_by(|a, b| b.views.cmp(&a.views));
    popular.truncate(limit);
    popular
}

/// News under one category heading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsCategory {
    pub category: String,
    pub items: Vec<NewsItem>,
}

/// Group news by category in first-seen order, keeping listing order inside.
pub fn news_by_category(news: &[NewsItem]) -> Vec<NewsCategory> {
    let mut groups: Vec<NewsCategory> = Vec::new();
    for item in news {
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(NewsCategory {
                category: item.category.clone(),
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

/// Response body of `GET /api/government/members`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    pub governor: Option<GovernmentMember>,
    pub members: Vec<GovernmentMember>,
}

impl Roster {
    /// Split a roster ordered by `order_number` into the governor and the rest.
    pub fn from_members(all: &[GovernmentMember]) -> Self {
        let governor = all.iter().find(|m| m.is_governor).cloned();
        let members = all.iter().filter(|m| !m.is_governor).cloned().collect();
        Self { governor, members }
    }
}
