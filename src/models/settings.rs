//! Settings and category models

use serde::{Deserialize, Serialize};

/// Built-in image for ball sports
pub const SVG_BALL: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 64 64'><circle cx='32' cy='32' r='28' fill='%23F97316'/><path d='M4 32h56M32 4v56' stroke='%23111827' stroke-width='3'/></svg>";

/// Built-in image for racket sports
pub const SVG_RACKET: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 64 64'><ellipse cx='26' cy='24' rx='16' ry='20' fill='none' stroke='%230EA5E9' stroke-width='4'/><path d='M36 40l18 18' stroke='%23111827' stroke-width='6' stroke-linecap='round'/></svg>";

/// Generic equipment image, last fallback for photos
pub const SVG_EQUIP: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 64 64'><rect x='8' y='16' width='48' height='36' rx='6' fill='%237C3AED'/><rect x='24' y='8' width='16' height='10' rx='3' fill='none' stroke='%237C3AED' stroke-width='4'/></svg>";

pub const DEFAULT_ICON: &str = "🏃";
pub const DEFAULT_BG_COLOR: &str = "#7C3AED";
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoMode {
    #[default]
    Icon,
    Image,
}

/// Equipment category. Equipment refers to it by `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub default_image: String,
}

impl Category {
    /// Case-insensitive name comparison used for uniqueness
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }
}

/// Global branding and taxonomy document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub logo_mode: LogoMode,
    pub icon: String,
    pub logo_data_url: String,
    pub bg_color: String,
    pub text_color: String,
    pub categories: Vec<Category>,
}

impl Settings {
    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Default image for a category name, tolerating dangling names
    pub fn default_image_for(&self, category_name: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.name == category_name)
            .map(|c| c.default_image.as_str())
            .unwrap_or(SVG_EQUIP)
    }
}

impl Default for Settings {
    fn default() -> Self {
        let builtin = [
            (1, "Basketball", SVG_BALL),
            (2, "Soccer", SVG_BALL),
            (3, "Badminton", SVG_RACKET),
            (4, "Volleyball", SVG_BALL),
            (5, "Table Tennis", SVG_RACKET),
            (6, "General Equipment", SVG_EQUIP),
        ];

        Self {
            logo_mode: LogoMode::Icon,
            icon: DEFAULT_ICON.to_string(),
            logo_data_url: String::new(),
            bg_color: DEFAULT_BG_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            categories: builtin
                .into_iter()
                .map(|(id, name, image)| Category {
                    id,
                    name: name.to_string(),
                    default_image: image.to_string(),
                })
                .collect(),
        }
    }
}
