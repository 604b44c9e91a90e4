//! Identity service: password digests, sign-up, sign-in and legacy migration

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{normalize_email, Registration, Role, User},
    repository::Repository,
};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email regex")
});

/// SHA-256 of the password, lowercase hex
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Recompute the digest and compare
pub fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password) == hash
}

/// At least 8 characters with at least one letter and one digit
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[derive(Clone)]
pub struct IdentityService {
    repository: Repository,
    config: AuthConfig,
}

impl IdentityService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        let email = normalize_email(&registration.email);
        if !is_valid_email(&email) {
            return Err(AppError::InvalidEmailFormat(registration.email.trim().to_string()));
        }
        if !is_strong_password(&registration.password) {
            return Err(AppError::WeakPassword);
        }
        if registration.role == Role::Admin
            && registration.admin_code.as_deref() != Some(self.config.admin_code.as_str())
        {
            return Err(AppError::InvalidAdminCode);
        }

        let _guard = self.repository.lock().await;
        let mut users = self.repository.users_list().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailInUse(email));
        }

        let user = User {
            email,
            password_hash: hash_password(&registration.password),
            role: registration.role,
            created_at: Utc::now(),
            legacy_password: None,
        };
        users.push(user.clone());
        self.repository.users_save(&users).await?;

        tracing::info!("Registered {} account {}", user.role, user.email);
        Ok(user)
    }

    /// Authenticate by email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email);
        let user = self
            .repository
            .users_find_by_email(&email)
            .await
            .ok_or(AppError::InvalidCredentials)?;

        if user.password_hash.is_empty() || !verify_password(password, &user.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        tracing::debug!("Authenticated {}", user.email);
        Ok(user)
    }

    /// Replace legacy plaintext passwords with digests. Returns how many
    /// records were rewritten; zero means nothing was persisted.
    pub async fn migrate_legacy_users(&self) -> AppResult<usize> {
        let _guard = self.repository.lock().await;
        let mut users = self.repository.users_list().await;

        let mut migrated = 0;
        for user in users.iter_mut().filter(|u| u.needs_migration()) {
            if let Some(plain) = user.legacy_password.take() {
                if user.password_hash.is_empty() {
                    user.password_hash = hash_password(&plain);
                }
                migrated += 1;
            }
        }

        if migrated > 0 {
            self.repository.users_save(&users).await?;
            tracing::info!("Migrated {} user record(s) to hashed passwords", migrated);
        }
        Ok(migrated)
    }
}
