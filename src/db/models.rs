use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::models::Role;
use crate::db::repository::{Entity, ListOrder};
use crate::error::AppError;

/// A public service citizens can apply for.
///
/// Corresponds to the `services` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub procedure: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub cost: String,
    /// External application form, if the service can be requested online.
    #[serde(default)]
    pub apply_url: Option<String>,
    /// Service centers where the service is provided in person.
    #[serde(default)]
    pub centers: Vec<String>,
    /// Page view counter, used to pick popular services.
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: DateTime<Utc>,
}

/// An open position in a government department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub salary: String,
    /// Employment type, e.g. full time.
    #[serde(rename = "type", default)]
    pub employment_type: String,
    #[serde(default)]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    #[serde(default)]
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A member of the government roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernmentMember {
    #[serde(default)]
    pub id: String,
    pub full_name: String,
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub is_governor: bool,
    /// Position in the roster, lower numbers first.
    #[serde(default)]
    pub order_number: i32,
}

/// One dated balance of the treasury ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasuryEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    /// Required; optional here so a missing date is reported by `validate`.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An administrator account managed by owners from the back-office.
///
/// Corresponds to the `accounts` collection. Never sent to clients as is:
/// the API exposes it without its password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAccount {
    #[serde(default)]
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Default-valued timestamps mean "not provided by the client".
fn is_unset(at: &DateTime<Utc>) -> bool {
    at.timestamp() == 0
}

impl Entity for Service {
    const COLLECTION: &'static str = "services";
    const ORDER: ListOrder = ListOrder::asc("title");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }

    fn prepare_insert(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn prepare_update(&mut self, existing: &Self, now: DateTime<Utc>) {
        self.created_at = existing.created_at;
        self.views = existing.views;
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

impl Entity for NewsItem {
    const COLLECTION: &'static str = "news";
    const ORDER: ListOrder = ListOrder::desc("published_at");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.published_at.cmp(&other.published_at)
    }

    fn prepare_insert(&mut self, now: DateTime<Utc>) {
        if is_unset(&self.published_at) {
            self.published_at = now;
        }
    }

    fn prepare_update(&mut self, existing: &Self, _now: DateTime<Utc>) {
        if is_unset(&self.published_at) {
            self.published_at = existing.published_at;
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("summary", &self.summary)
    }
}

impl Entity for JobPosting {
    const COLLECTION: &'static str = "jobs";
    const ORDER: ListOrder = ListOrder::desc("published_at");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.published_at.cmp(&other.published_at)
    }

    fn prepare_insert(&mut self, now: DateTime<Utc>) {
        if is_unset(&self.published_at) {
            self.published_at = now;
        }
    }

    fn prepare_update(&mut self, existing: &Self, _now: DateTime<Utc>) {
        if is_unset(&self.published_at) {
            self.published_at = existing.published_at;
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

impl Entity for FaqEntry {
    const COLLECTION: &'static str = "faq";
    const ORDER: ListOrder = ListOrder::desc("created_at");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.created_at.cmp(&other.created_at)
    }

    fn prepare_insert(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn prepare_update(&mut self, existing: &Self, now: DateTime<Utc>) {
        self.created_at = existing.created_at;
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), AppError> {
        require("question", &self.question)?;
        require("answer", &self.answer)
    }
}

impl Entity for GovernmentMember {
    const COLLECTION: &'static str = "government_members";
    const ORDER: ListOrder = ListOrder::asc("order_number");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.order_number.cmp(&other.order_number)
    }

    fn validate(&self) -> Result<(), AppError> {
        require("full_name", &self.full_name)?;
        require("position", &self.position)
    }
}

impl Entity for TreasuryEntry {
    const COLLECTION: &'static str = "treasury";
    const ORDER: ListOrder = ListOrder::asc("date");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }

    fn prepare_insert(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }

    fn prepare_update(&mut self, existing: &Self, _now: DateTime<Utc>) {
        self.created_at = existing.created_at;
    }

    fn validate(&self) -> Result<(), AppError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(AppError::BadRequest(
                "amount must be a positive number".into(),
            ));
        }
        if self.date.is_none() {
            return Err(AppError::BadRequest("date is required".into()));
        }
        Ok(())
    }
}

impl Entity for StaffAccount {
    const COLLECTION: &'static str = "accounts";
    const ORDER: ListOrder = ListOrder::asc("email");

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.email.cmp(&other.email)
    }

    fn prepare_insert(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn prepare_update(&mut self, existing: &Self, now: DateTime<Utc>) {
        self.created_at = existing.created_at;
        self.updated_at = now;
    }

    fn validate(&self) -> Result<(), AppError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("name", &self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_row_defaults() {
        // Rows written by older admin screens lack centers and views
        let json = r###"{
            "id": "1",
            "title": "Получение паспорта",
            "description": "Оформление паспорта",
            "department": "Департамент внутренних дел",
            "cost": "1000",
            "created_at": "2023-01-15T00:00:00Z",
            "updated_at": "2023-06-20T00:00:00Z"
        }"###;

        let service: Service = serde_json::from_str(json).unwrap();
        assert!(service.centers.is_empty());
        assert_eq!(service.views, 0);
        assert_eq!(service.apply_url, None);
    }

    #[test]
    fn test_job_type_field_name() {
        let json = r###"{
            "id": "7",
            "title": "Юрист",
            "description": "Правовое сопровождение",
            "type": "Полная занятость",
            "published_at": "2023-11-05T00:00:00Z"
        }"###;

        let job: JobPosting = serde_json::from_str(json).unwrap();
        assert_eq!(job.employment_type, "Полная занятость");
        assert!(job.deadline.is_none());

        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back["type"], "Полная занятость");
    }

    #[test]
    fn test_treasury_validation() {
        let mut entry = TreasuryEntry {
            id: String::new(),
            amount: 0.0,
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            comment: None,
            created_at: None,
        };
        assert!(entry.validate().is_err());

        entry.amount = -5.0;
        assert!(entry.validate().is_err());

        entry.amount = 1500.5;
        assert!(entry.validate().is_ok());

        entry.date = None;
        match entry.validate() {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("date")),
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    #[test]
    fn test_treasury_body_without_date_parses() {
        let entry: TreasuryEntry = serde_json::from_str(r#"{"amount": 100.0}"#).unwrap();
        assert!(entry.date.is_none());
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_required_text_fields() {
        let faq = FaqEntry {
            id: String::new(),
            question: "  ".to_string(),
            answer: "Ответ".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        match faq.validate() {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("question")),
            other => panic!("Expected BadRequest, got: {:?}", other),
        }
    }

    #[test]
    fn test_service_update_preserves_counters() {
        let created = Utc::now() - chrono::Duration::days(30);
        let existing = Service {
            id: "1".into(),
            title: "Old".into(),
            description: "d".into(),
            duration: String::new(),
            requirements: String::new(),
            procedure: String::new(),
            department: String::new(),
            cost: String::new(),
            apply_url: None,
            centers: vec![],
            views: 42,
            created_at: created,
            updated_at: created,
        };
        let mut incoming = existing.clone();
        incoming.views = 0;
        incoming.title = "New".into();

        let now = Utc::now();
        incoming.prepare_update(&existing, now);
        assert_eq!(incoming.views, 42);
        assert_eq!(incoming.created_at, created);
        assert_eq!(incoming.updated_at, now);
    }
}
