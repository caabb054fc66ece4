use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::models::{AuthenticatedUser, Role};
use crate::error::AppError;

/// An administrator account as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

/// Checks email/password pairs and resolves them to a user.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError>;
}

/// Credentials backed by the configured account list.
pub struct ConfiguredCredentials {
    accounts: Vec<Account>,
}

impl ConfiguredCredentials {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// One account per role, for local demos.
    pub fn demo() -> Self {
        let account = |local: &str, name: &str, role: Role| Account {
            email: format!("{local}@demo.e-davis.gov"),
            password: local.to_string(),
            name: Some(name.to_string()),
            role,
        };
        Self::new(vec![
            account("owner", "Владелец портала", Role::Owner),
            account("admin", "Администратор", Role::Admin),
            account("moderator", "Модератор", Role::Moderator),
        ])
    }

    pub fn into_accounts(self) -> Vec<Account> {
        self.accounts
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether an account with this email is configured.
    pub fn contains(&self, email: &str) -> bool {
        self.accounts.iter().any(|a| a.email.eq_ignore_ascii_case(email.trim()))
    }
}

#[async_trait]
impl CredentialProvider for ConfiguredCredentials {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest("Email and password are required".into()));
        }

        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .map(|a| AuthenticatedUser {
                user_id: a.email.to_lowercase(),
                email: a.email.clone(),
                name: a.name.clone(),
                role: a.role,
            })
            .ok_or_else(|| AppError::Auth("Invalid email or password".into()))
    }
}
