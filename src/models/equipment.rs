//! Equipment model

use serde::{Deserialize, Serialize};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Equipment {
    pub id: u64,
    /// Equipment name / description
    pub name: String,
    /// Category name. Soft reference, may no longer match any category.
    #[serde(rename = "type")]
    pub category: String,
    /// Number of units owned
    pub total: u32,
    /// Units currently on the shelf
    pub avail: u32,
    /// Photo data URL
    #[serde(default)]
    pub photo: String,
}

impl Equipment {
    /// Units out on loan according to the counters
    pub fn borrowed(&self) -> u32 {
        self.total.saturating_sub(self.avail)
    }
}

/// Create or edit request. `id` absent means create.
#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentDraft {
    pub id: Option<u64>,
    pub name: String,
    pub category: String,
    pub total: u32,
    pub avail: u32,
    /// Empty falls back to the category's default image
    #[serde(default)]
    pub photo: String,
}

impl EquipmentDraft {
    /// Draft pre-filled from an existing record
    pub fn from_existing(item: &Equipment) -> Self {
        Self {
            id: Some(item.id),
            name: item.name.clone(),
            category: item.category.clone(),
            total: item.total,
            avail: item.avail,
            photo: item.photo.clone(),
        }
    }
}

/// Aggregate counters across the inventory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total: u64,
    pub avail: u64,
    pub borrowed: u64,
}
