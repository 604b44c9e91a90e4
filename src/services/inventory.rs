//! Inventory service: admin equipment management and usage statistics

use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{Equipment, EquipmentDraft, InventoryStats},
        log::Log,
    },
    repository::{next_id, Repository},
    services::undo::{CompensatingAction, UndoRegistry, UndoTicket},
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
    undo: UndoRegistry,
}

impl InventoryService {
    pub fn new(repository: Repository, undo: UndoRegistry) -> Self {
        Self { repository, undo }
    }

    pub async fn list(&self) -> Vec<Equipment> {
        self.repository.equipment_list().await
    }

    pub async fn get_by_id(&self, id: u64) -> AppResult<Equipment> {
        self.repository.equipment_get_by_id(id).await
    }

    /// Create (no id) or replace (id) an equipment record.
    ///
    /// Admin edits may set `total`/`avail` freely within `avail <= total`;
    /// they are not reconciled against open loans.
    pub async fn save(&self, draft: EquipmentDraft) -> AppResult<Equipment> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Equipment name is required".to_string()));
        }
        if draft.total < 1 {
            return Err(AppError::Validation("Total must be at least 1".to_string()));
        }
        if draft.avail > draft.total {
            return Err(AppError::Validation(format!(
                "Available ({}) cannot exceed total ({})",
                draft.avail, draft.total
            )));
        }

        let _guard = self.repository.lock().await;
        let photo = if draft.photo.is_empty() {
            self.repository
                .settings_get()
                .await
                .default_image_for(&draft.category)
                .to_string()
        } else {
            draft.photo.clone()
        };

        let mut equipment = self.repository.equipment_list().await;
        let item = Equipment {
            id: draft.id.unwrap_or_else(next_id),
            name: name.to_string(),
            category: draft.category.clone(),
            total: draft.total,
            avail: draft.avail,
            photo,
        };

        match draft.id {
            Some(id) => {
                let slot = equipment
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;
                *slot = item.clone();
                tracing::info!("Updated equipment {} ({})", item.name, item.id);
            }
            None => {
                equipment.push(item.clone());
                tracing::info!("Added equipment {} ({})", item.name, item.id);
            }
        }
        self.repository.equipment_save(&equipment).await?;
        Ok(item)
    }

    /// Delete one item. Logs referring to it are kept.
    pub async fn delete(&self, id: u64) -> AppResult<UndoTicket> {
        self.bulk_delete(&[id]).await.map_err(|e| match e {
            AppError::Validation(_) => AppError::NotFound(format!("Equipment {} not found", id)),
            other => other,
        })
    }

    /// Delete every listed item that exists
    pub async fn bulk_delete(&self, ids: &[u64]) -> AppResult<UndoTicket> {
        let wanted: HashSet<u64> = ids.iter().copied().collect();

        let removed = {
            let _guard = self.repository.lock().await;
            let equipment = self.repository.equipment_list().await;
            let (removed, kept): (Vec<Equipment>, Vec<Equipment>) =
                equipment.into_iter().partition(|e| wanted.contains(&e.id));
            if removed.is_empty() {
                return Err(AppError::Validation(
                    "None of the selected equipment exists".to_string(),
                ));
            }
            self.repository.equipment_save(&kept).await?;
            removed
        };

        tracing::info!("Deleted {} equipment item(s)", removed.len());
        Ok(self
            .undo
            .record(CompensatingAction::RestoreEquipment(removed))
            .await)
    }

    /// Sum of counters over all equipment
    pub async fn stats(&self) -> InventoryStats {
        let equipment = self.repository.equipment_list().await;
        InventoryStats {
            total: equipment.iter().map(|e| e.total as u64).sum(),
            avail: equipment.iter().map(|e| e.avail as u64).sum(),
            borrowed: equipment.iter().map(|e| e.borrowed() as u64).sum(),
        }
    }

    /// Last `limit` logs, newest first
    pub async fn recent_activity(&self, limit: usize) -> Vec<Log> {
        self.all_history().await.into_iter().take(limit).collect()
    }

    /// Every log, newest first
    pub async fn all_history(&self) -> Vec<Log> {
        let mut logs = self.repository.logs_list().await;
        logs.reverse();
        logs
    }
}
