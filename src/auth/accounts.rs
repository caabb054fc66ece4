use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::credentials::{ConfiguredCredentials, CredentialProvider};
use crate::auth::models::{AuthenticatedUser, Role};
use crate::content::reader::bounded;
use crate::db::models::StaffAccount;
use crate::db::repository::{Entity, Repository};
use crate::error::AppError;

/// Body of `POST /api/admin/users`.
#[derive(Debug, Default, Deserialize)]
pub struct NewAccount {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Body of `PUT /api/admin/users/{id}`. An absent or blank password keeps
/// the current one.
#[derive(Debug, Default, Deserialize)]
pub struct AccountChanges {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub password: Option<String>,
}

/// A stored account as the back-office sees it, without the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StaffAccount> for AccountProfile {
    fn from(account: StaffAccount) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

fn required_role(role: Option<Role>) -> Result<Role, AppError> {
    role.ok_or_else(|| AppError::BadRequest("role cannot be empty".into()))
}

/// Administrator accounts: the fixed ones from configuration plus the ones
/// owners manage at runtime.
///
/// Configured accounts are checked first at sign-in and cannot be edited
/// through the directory.
pub struct AccountDirectory {
    configured: ConfiguredCredentials,
    stored: Arc<dyn Repository<StaffAccount>>,
    timeout: Duration,
}

impl AccountDirectory {
    pub fn new(
        configured: ConfiguredCredentials,
        stored: Arc<dyn Repository<StaffAccount>>,
        timeout: Duration,
    ) -> Self {
        Self {
            configured,
            stored,
            timeout,
        }
    }

    pub fn has_configured_accounts(&self) -> bool {
        !self.configured.is_empty()
    }

    /// Stored accounts, by email.
    pub async fn list(&self) -> Result<Vec<AccountProfile>, AppError> {
        let accounts = bounded(self.timeout, self.stored.list()).await?;
        Ok(accounts.into_iter().map(AccountProfile::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<AccountProfile>, AppError> {
        let found = bounded(self.timeout, self.stored.find_by_id(id)).await?;
        Ok(found.map(AccountProfile::from))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, AppError> {
        if self.configured.contains(email) {
            return Ok(true);
        }
        let accounts = bounded(self.timeout, self.stored.list()).await?;
        Ok(accounts.iter().any(|a| a.email.eq_ignore_ascii_case(email)))
    }

    pub async fn create(&self, new: NewAccount) -> Result<AccountProfile, AppError> {
        let now = Utc::now();
        let account = StaffAccount {
            id: uuid::Uuid::new_v4().to_string(),
            email: new.email.trim().to_lowercase(),
            password: new.password,
            name: new.name.trim().to_string(),
            role: required_role(new.role)?,
            created_at: now,
            updated_at: now,
        };
        account.validate()?;
        if self.email_taken(&account.email).await? {
            return Err(AppError::BadRequest(format!(
                "Account '{}' already exists",
                account.email
            )));
        }

        let created = bounded(self.timeout, self.stored.insert(account)).await?;
        tracing::info!(
            id = %created.id,
            email = %created.email,
            role = %created.role,
            "Account created"
        );
        Ok(created.into())
    }

    /// Change name, role and optionally the password of a stored account.
    ///
    /// `acting` may not change their own role. Returns `None` if no stored
    /// account has the given id.
    pub async fn update(
        &self,
        id: &str,
        changes: AccountChanges,
        acting: &AuthenticatedUser,
    ) -> Result<Option<AccountProfile>, AppError> {
        let role = required_role(changes.role)?;
        let Some(existing) = bounded(self.timeout, self.stored.find_by_id(id)).await? else {
            return Ok(None);
        };
        if acting.user_id == id && role != existing.role {
            return Err(AppError::BadRequest("You cannot change your own role".into()));
        }

        let mut account = StaffAccount {
            name: changes.name.trim().to_string(),
            role,
            ..existing.clone()
        };
        if let Some(password) = changes.password.filter(|p| !p.is_empty()) {
            account.password = password;
        }
        account.validate()?;
        account.prepare_update(&existing, Utc::now());

        let updated = bounded(self.timeout, self.stored.update(id, account)).await?;
        if let Some(account) = &updated {
            tracing::info!(id, email = %account.email, role = %account.role, "Account updated");
        }
        Ok(updated.map(AccountProfile::from))
    }

    /// Remove a stored account. `acting` may not remove themselves.
    pub async fn delete(&self, id: &str, acting: &AuthenticatedUser) -> Result<bool, AppError> {
        if acting.user_id == id {
            return Err(AppError::BadRequest("You cannot delete your own account".into()));
        }
        let removed = bounded(self.timeout, self.stored.delete(id)).await?;
        if removed {
            tracing::info!(id, "Account deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl CredentialProvider for AccountDirectory {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthenticatedUser, AppError> {
        match self.configured.sign_in(email, password).await {
            Err(AppError::Auth(_)) => {}
            outcome => return outcome,
        }

        let accounts = bounded(self.timeout, self.stored.list()).await?;
        accounts
            .into_iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()) && a.password == password)
            .map(|a| AuthenticatedUser {
                user_id: a.id,
                email: a.email,
                name: Some(a.name),
                role: a.role,
            })
            .ok_or_else(|| AppError::Auth("Invalid email or password".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryRepository;

    fn directory() -> AccountDirectory {
        AccountDirectory::new(
            ConfiguredCredentials::demo(),
            Arc::new(InMemoryRepository::<StaffAccount>::new()),
            Duration::from_secs(1),
        )
    }

    fn owner() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "owner@demo.e-davis.gov".into(),
            email: "owner@demo.e-davis.gov".into(),
            name: None,
            role: Role::Owner,
        }
    }

    fn new_account(email: &str, role: Role) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            password: "s3cret".to_string(),
            name: "Анна Ким".to_string(),
            role: Some(role),
        }
    }

    #[tokio::test]
    async fn test_created_account_can_sign_in() {
        let dir = directory();
        let created = dir
            .create(new_account(" Anna@E-Davis.gov ", Role::Moderator))
            .await
            .unwrap();
        assert_eq!(created.email, "anna@e-davis.gov");

        let user = dir.sign_in("anna@e-davis.gov", "s3cret").await.unwrap();
        assert_eq!(user.user_id, created.id);
        assert_eq!(user.role, Role::Moderator);

        let wrong = dir.sign_in("anna@e-davis.gov", "nope").await;
        assert!(matches!(wrong, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_configured_accounts_still_sign_in() {
        let dir = directory();
        let user = dir.sign_in("admin@demo.e-davis.gov", "admin").await.unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_create_requires_every_field_and_unique_email() {
        let dir = directory();

        let missing_role = NewAccount {
            role: None,
            ..new_account("x@e-davis.gov", Role::Admin)
        };
        assert!(matches!(dir.create(missing_role).await, Err(AppError::BadRequest(_))));

        let blank_password = NewAccount {
            password: String::new(),
            ..new_account("x@e-davis.gov", Role::Admin)
        };
        assert!(matches!(dir.create(blank_password).await, Err(AppError::BadRequest(_))));

        dir.create(new_account("x@e-davis.gov", Role::Admin)).await.unwrap();
        let duplicate = dir.create(new_account("X@e-davis.gov", Role::Admin)).await;
        assert!(matches!(duplicate, Err(AppError::BadRequest(_))));

        let configured = dir.create(new_account("owner@demo.e-davis.gov", Role::Admin)).await;
        assert!(matches!(configured, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_password_unless_given() {
        let dir = directory();
        let created = dir.create(new_account("y@e-davis.gov", Role::Moderator)).await.unwrap();

        let changes = AccountChanges {
            name: "Анна Ким-Ли".to_string(),
            role: Some(Role::Admin),
            password: None,
        };
        let updated = dir.update(&created.id, changes, &owner()).await.unwrap().unwrap();
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.created_at, created.created_at);
        assert!(dir.sign_in("y@e-davis.gov", "s3cret").await.is_ok());

        let changes = AccountChanges {
            name: "Анна Ким-Ли".to_string(),
            role: Some(Role::Admin),
            password: Some("n3w".to_string()),
        };
        dir.update(&created.id, changes, &owner()).await.unwrap();
        assert!(dir.sign_in("y@e-davis.gov", "s3cret").await.is_err());
        assert!(dir.sign_in("y@e-davis.gov", "n3w").await.is_ok());

        let changes = AccountChanges {
            name: "Никто".to_string(),
            role: Some(Role::Admin),
            password: None,
        };
        assert!(dir.update("missing", changes, &owner()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cannot_demote_or_delete_self() {
        let dir = directory();
        let created = dir.create(new_account("z@e-davis.gov", Role::Owner)).await.unwrap();
        let me = dir.sign_in("z@e-davis.gov", "s3cret").await.unwrap();

        let demote = AccountChanges {
            name: "Анна".to_string(),
            role: Some(Role::Moderator),
            password: None,
        };
        let result = dir.update(&created.id, demote, &me).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = dir.delete(&created.id, &me).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        assert!(dir.delete(&created.id, &owner()).await.unwrap());
        assert!(!dir.delete(&created.id, &owner()).await.unwrap());
        assert!(dir.list().await.unwrap().is_empty());
    }
}
