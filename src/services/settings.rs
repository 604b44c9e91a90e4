//! Settings service: branding and the category taxonomy

use crate::{
    error::{AppError, AppResult},
    models::settings::{
        Category, LogoMode, Settings, DEFAULT_BG_COLOR, DEFAULT_TEXT_COLOR, SVG_EQUIP,
    },
    repository::{next_id, Repository},
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get current settings
    pub async fn get_settings(&self) -> Settings {
        self.repository.settings_get().await
    }

    /// Replace the whole settings document. No field merging.
    pub async fn update_settings(&self, settings: Settings) -> AppResult<Settings> {
        let _guard = self.repository.lock().await;
        self.repository.settings_save(&settings).await?;
        tracing::info!("Settings updated");
        Ok(settings)
    }

    /// Read, change and persist the current document under the write lock
    async fn modify<F>(&self, change: F) -> AppResult<Settings>
    where
        F: FnOnce(&mut Settings),
    {
        let _guard = self.repository.lock().await;
        let mut settings = self.repository.settings_get().await;
        change(&mut settings);
        self.repository.settings_save(&settings).await?;
        Ok(settings)
    }

    /// Switch the logo to an emoji/icon
    pub async fn set_icon_logo(&self, icon: &str) -> AppResult<Settings> {
        let settings = self
            .modify(|s| {
                s.logo_mode = LogoMode::Icon;
                s.icon = icon.to_string();
            })
            .await?;
        tracing::info!("Logo set to icon {}", icon);
        Ok(settings)
    }

    /// Switch the logo to an uploaded image
    pub async fn set_image_logo(&self, data_url: &str) -> AppResult<Settings> {
        if data_url.is_empty() {
            return Err(AppError::Validation("Logo image is empty".to_string()));
        }
        let settings = self
            .modify(|s| {
                s.logo_mode = LogoMode::Image;
                s.logo_data_url = data_url.to_string();
            })
            .await?;
        tracing::info!("Logo set to uploaded image");
        Ok(settings)
    }

    pub async fn set_colors(&self, bg_color: &str, text_color: &str) -> AppResult<Settings> {
        let settings = self
            .modify(|s| {
                s.bg_color = bg_color.to_string();
                s.text_color = text_color.to_string();
            })
            .await?;
        tracing::info!("Theme colors set to {} / {}", bg_color, text_color);
        Ok(settings)
    }

    pub async fn reset_colors(&self) -> AppResult<Settings> {
        self.set_colors(DEFAULT_BG_COLOR, DEFAULT_TEXT_COLOR).await
    }

    /// Append a category. Names are unique ignoring case.
    pub async fn add_category(
        &self,
        name: &str,
        default_image: Option<&str>,
    ) -> AppResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name cannot be empty".to_string()));
        }

        let _guard = self.repository.lock().await;
        let mut settings = self.repository.settings_get().await;
        if settings.categories.iter().any(|c| c.same_name(name)) {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        let category = Category {
            id: next_id(),
            name: name.to_string(),
            default_image: default_image
                .filter(|img| !img.is_empty())
                .unwrap_or(SVG_EQUIP)
                .to_string(),
        };
        settings.categories.push(category.clone());
        self.repository.settings_save(&settings).await?;

        tracing::info!("Added category {} ({})", category.name, category.id);
        Ok(category)
    }

    /// Remove a category unless equipment still refers to it
    pub async fn delete_category(&self, id: u64) -> AppResult<Category> {
        let _guard = self.repository.lock().await;
        let mut settings = self.repository.settings_get().await;
        let category = settings
            .category(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        if self.repository.equipment_uses_category(&category.name).await {
            return Err(AppError::CategoryInUse(category.name));
        }

        settings.categories.retain(|c| c.id != id);
        self.repository.settings_save(&settings).await?;

        tracing::info!("Deleted category {} ({})", category.name, category.id);
        Ok(category)
    }

    /// Whether any equipment refers to the category by name. Unknown ids are not in use.
    pub async fn is_category_in_use(&self, id: u64) -> bool {
        let settings = self.repository.settings_get().await;
        match settings.category(id) {
            Some(category) => self.repository.equipment_uses_category(&category.name).await,
            None => false,
        }
    }
}
