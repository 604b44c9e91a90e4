//! User domain methods on Repository

use super::{Collection, Repository};
use crate::{error::AppResult, models::user::User};

impl Repository {
    /// List all users in storage order
    pub async fn users_list(&self) -> Vec<User> {
        self.read_or(Collection::Users, Vec::new()).await
    }

    /// Replace the users document
    pub async fn users_save(&self, users: &[User]) -> AppResult<()> {
        self.write(Collection::Users, users).await
    }

    /// Find a user by already-normalized email
    pub async fn users_find_by_email(&self, email: &str) -> Option<User> {
        self.users_list().await.into_iter().find(|u| u.email == email)
    }
}
