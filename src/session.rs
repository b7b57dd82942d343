//! Explicit session context for callers of the engine
//!
//! Holds who is acting and in which roles. The affordability engine itself
//! never takes a session; callers use it to decide which operations to offer.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Closed set of roles issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_AFFILIATE")]
    Affiliate,
    #[serde(rename = "ROLE_ANALYST")]
    Analyst,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Affiliate => "ROLE_AFFILIATE",
            Role::Analyst => "ROLE_ANALYST",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ROLE_AFFILIATE" | "AFFILIATE" => Ok(Role::Affiliate),
            "ROLE_ANALYST" | "ANALYST" => Ok(Role::Analyst),
            "ROLE_ADMIN" | "ADMIN" => Ok(Role::Admin),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub username: String,
    pub roles: BTreeSet<Role>,
    /// Set once the caller's affiliate profile is known
    #[serde(default)]
    pub affiliate_id: Option<u64>,
}

impl SessionContext {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
            affiliate_id: None,
        }
    }

    /// Build a context from backend role strings, rejecting any unknown role
    pub fn from_role_names<'a>(
        username: impl Into<String>,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, SessionError> {
        let roles = names
            .into_iter()
            .map(Role::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self {
            username: username.into(),
            roles,
            affiliate_id: None,
        })
    }

    pub fn with_affiliate(mut self, affiliate_id: u64) -> Self {
        self.affiliate_id = Some(affiliate_id);
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Affiliates file their own loan requests
    pub fn can_submit_applications(&self) -> bool {
        self.has_role(Role::Affiliate)
    }

    /// Analysts and admins approve or reject
    pub fn can_review_applications(&self) -> bool {
        self.has_role(Role::Analyst) || self.has_role(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("ROLE_ANALYST".parse::<Role>().unwrap(), Role::Analyst);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(
            "ROLE_SUPERUSER".parse::<Role>(),
            Err(SessionError::UnknownRole("ROLE_SUPERUSER".into()))
        );
    }

    #[test]
    fn test_permissions() {
        let affiliate = SessionContext::new("ana", [Role::Affiliate]).with_affiliate(12);
        assert!(affiliate.can_submit_applications());
        assert!(!affiliate.can_review_applications());
        assert_eq!(affiliate.affiliate_id, Some(12));

        let analyst = SessionContext::from_role_names("luis", ["ROLE_ANALYST"]).unwrap();
        assert!(analyst.can_review_applications());
        assert!(!analyst.can_submit_applications());
    }

    #[test]
    fn test_unknown_role_rejects_context() {
        let result = SessionContext::from_role_names("eve", ["ROLE_AFFILIATE", "ROLE_ROOT"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_roles_serialize_with_prefix() {
        let ctx = SessionContext::new("ana", [Role::Admin, Role::Affiliate]);
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["roles"], serde_json::json!(["ROLE_AFFILIATE", "ROLE_ADMIN"]));
    }
}
