//! Equipment domain methods on Repository

use super::{Collection, Repository};
use crate::{
    error::{AppError, AppResult},
    models::equipment::Equipment,
};

impl Repository {
    /// List all equipment in storage order
    pub async fn equipment_list(&self) -> Vec<Equipment> {
        self.read_or(Collection::Equipment, Vec::new()).await
    }

    /// Replace the equipment document
    pub async fn equipment_save(&self, equipment: &[Equipment]) -> AppResult<()> {
        self.write(Collection::Equipment, equipment).await
    }

    /// Get equipment by ID
    pub async fn equipment_get_by_id(&self, id: u64) -> AppResult<Equipment> {
        self.equipment_list()
            .await
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Whether any equipment points at this category name (exact match)
    pub async fn equipment_uses_category(&self, category_name: &str) -> bool {
        self.equipment_list()
            .await
            .iter()
            .any(|e| e.category == category_name)
    }
}
