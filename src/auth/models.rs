use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative roles of the portal.
///
/// Roles are not ordered: each protected area lists the roles it admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control, including other administrators.
    Owner,
    /// Manages all content and portal settings.
    Admin,
    /// Publishes news and job postings.
    Moderator,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Admin => write!(f, "admin"),
            Role::Moderator => write!(f, "moderator"),
        }
    }
}

/// Roles allowed to manage administrator accounts.
pub const OWNERS: &[Role] = &[Role::Owner];

/// Roles allowed to manage services, FAQ, government, treasury and settings.
pub const CONTENT_ADMINS: &[Role] = &[Role::Owner, Role::Admin];

/// Roles allowed to manage news and job postings.
pub const PUBLISHERS: &[Role] = &[Role::Owner, Role::Admin, Role::Moderator];

/// A signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

/// Whether `user` holds one of the `allowed` roles. Anonymous users hold none.
pub fn has_role(user: Option<&AuthenticatedUser>, allowed: &[Role]) -> bool {
    user.is_some_and(|u| allowed.contains(&u.role))
}
