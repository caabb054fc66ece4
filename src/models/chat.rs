//! State of the assistant chat widget, independent of the UI toolkit.

use crate::models::search::{GroupedResults, ResultKind, SearchResult};

pub const GREETING: &str = "Здравствуйте! Я виртуальный помощник портала E-Davis. Чем могу помочь?";
pub const SEARCHING: &str = "Ищу информацию...";
pub const FOUND: &str = "Вот что я нашел:";
pub const NOTHING_FOUND: &str = "К сожалению, ничего не найдено.";
pub const SEARCH_FAILED: &str = "Произошла ошибка при поиске.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// What a transcript entry shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(String),
    /// Transient placeholder while a search is running.
    Searching,
    /// Matches grouped under kind headings.
    Results(Vec<(ResultKind, Vec<SearchResult>)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub speaker: Speaker,
    pub body: MessageBody,
}

/// A submitted question waiting for its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    /// Id of the placeholder message the answer replaces.
    pub ticket: u64,
    pub query: String,
}

/// Ordered conversation of the widget.
///
/// Only one search runs at a time; submissions made meanwhile are rejected.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
    in_flight: Option<u64>,
}

impl Transcript {
    /// A new conversation opened by the greeting.
    pub fn new() -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 0,
            in_flight: None,
        };
        transcript.push(Speaker::Assistant, MessageBody::Text(GREETING.to_string()));
        transcript
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn push(&mut self, speaker: Speaker, body: MessageBody) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, speaker, body });
        id
    }

    /// Record a user question and open a search placeholder.
    ///
    /// Returns `None` for blank input or while another search is running.
    pub fn submit(&mut self, input: &str) -> Option<PendingSearch> {
        let query = input.trim();
        if query.is_empty() || self.is_busy() {
            return None;
        }

        self.push(Speaker::User, MessageBody::Text(query.to_string()));
        let ticket = self.push(Speaker::Assistant, MessageBody::Searching);
        self.in_flight = Some(ticket);

        Some(PendingSearch {
            ticket,
            query: query.to_string(),
        })
    }

    /// Replace the placeholder of `ticket` with the answer.
    ///
    /// A transport failure is passed as `Err` and shown as an error message.
    /// Returns `false` if `ticket` is not the search in flight.
    pub fn resolve(&mut self, ticket: u64, outcome: Result<GroupedResults, String>) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;

        let body = match outcome {
            Ok(grouped) => {
                let groups = answer_groups(&grouped);
                if groups.is_empty() {
                    MessageBody::Text(NOTHING_FOUND.to_string())
                } else {
                    MessageBody::Results(groups)
                }
            }
            Err(_) => MessageBody::Text(SEARCH_FAILED.to_string()),
        };

        match self.messages.iter_mut().find(|m| m.id == ticket) {
            Some(message) => message.body = body,
            None => {
                self.push(Speaker::Assistant, body);
            }
        }
        true
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-empty groups of an answer, in kind order.
pub fn answer_groups(grouped: &GroupedResults) -> Vec<(ResultKind, Vec<SearchResult>)> {
    grouped
        .groups()
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(kind, items)| (kind, items.to_vec()))
        .collect()
}

/// Endpoint URL for a widget question.
pub fn search_url(query: &str) -> String {
    format!("/api/search/widget?q={}", urlencoding::encode(query))
}
