//! Settings domain methods on Repository

use super::{Collection, Repository};
use crate::{error::AppResult, models::settings::Settings};

impl Repository {
    /// Current settings, or the built-in defaults
    pub async fn settings_get(&self) -> Settings {
        self.read_or(Collection::Settings, Settings::default()).await
    }

    /// Replace the settings document
    pub async fn settings_save(&self, settings: &Settings) -> AppResult<()> {
        self.write(Collection::Settings, settings).await
    }

    /// Persist the defaults when no settings document exists yet
    pub async fn settings_ensure_defaults(&self) -> AppResult<bool> {
        if self.exists(Collection::Settings).await? {
            return Ok(false);
        }
        self.settings_save(&Settings::default()).await?;
        Ok(true)
    }
}
