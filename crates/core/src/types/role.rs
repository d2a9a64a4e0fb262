//! Role enums for authorization and chat.

use serde::{Deserialize, Serialize};

/// User role with different permission levels.
///
/// Stored in the `profiles.role` column as the Postgres enum `user_role`.
/// These three values are the only valid roles; everything else must fail
/// to parse before any query is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular site visitor with an account.
    #[default]
    User,
    /// Can manage site content and users.
    Admin,
    /// Admin plus role management over other admins.
    Superuser,
}

impl UserRole {
    /// Whether this role grants access to the admin panel.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::Superuser)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
            Self::Superuser => write!(f, "superuser"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superuser" => Ok(Self::Superuser),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Chat message role for the completion relay.
///
/// Chat messages are transient - held in the request payload only, never
/// persisted - so there is no database mapping for this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_parse_accepts_only_enumerated_values() {
        assert_eq!(UserRole::from_str("user").unwrap(), UserRole::User);
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert_eq!(
            UserRole::from_str("superuser").unwrap(),
            UserRole::Superuser
        );

        for invalid in ["root", "Administrator", "ADMIN", "super_user", "", "owner"] {
            assert!(
                UserRole::from_str(invalid).is_err(),
                "{invalid:?} must not parse as a role"
            );
        }
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in [UserRole::User, UserRole::Admin, UserRole::Superuser] {
            assert_eq!(UserRole::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(!UserRole::User.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::Superuser.is_admin());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&UserRole::Superuser).unwrap();
        assert_eq!(json, "\"superuser\"");

        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_chat_role_serde() {
        let json = serde_json::to_string(&ChatRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
