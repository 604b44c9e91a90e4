//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Stored user record
///
/// Records written by older versions may still carry a plaintext `password`
/// and lack every other field except `email`; those default on read and are
/// rewritten by the legacy migration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Lower-cased, unique
    pub email: String,
    /// SHA-256 hex digest
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    /// Creation instant, stored as epoch milliseconds
    #[serde(default, with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Legacy plaintext password. Never written back once migrated.
    #[serde(
        rename = "password",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_password: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this record still needs the password-hash migration
    pub fn needs_migration(&self) -> bool {
        self.legacy_password.is_some()
    }
}

/// Sign-up request
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Required when `role` is admin
    pub admin_code: Option<String>,
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
