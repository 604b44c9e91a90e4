//! Undo registry for destructive inventory operations
//!
//! Each deletion records its inverse as an [`UndoTicket`]. A ticket starts
//! `Active` and settles exactly once, either `Undone` by an explicit request
//! inside the window or `Expired` when the request comes too late.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, AppResult},
    models::equipment::Equipment,
    repository::{next_id, Repository},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoState {
    Active,
    Undone,
    Expired,
}

/// Compensating action for a destructive operation
#[derive(Debug, Clone, PartialEq)]
pub enum CompensatingAction {
    /// Append these records back to the equipment list
    RestoreEquipment(Vec<Equipment>),
}

/// Handle returned to the caller of a destructive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoTicket {
    pub id: u64,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Entry {
    action: CompensatingAction,
    expires_at: DateTime<Utc>,
    state: UndoState,
}

#[derive(Clone)]
pub struct UndoRegistry {
    repository: Repository,
    window: Duration,
    entries: Arc<Mutex<HashMap<u64, Entry>>>,
}

impl UndoRegistry {
    pub fn new(repository: Repository, window_ms: u64) -> Self {
        Self {
            repository,
            window: Duration::milliseconds(window_ms as i64),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record an inverse action and hand out its ticket
    pub async fn record(&self, action: CompensatingAction) -> UndoTicket {
        let now = Utc::now();
        let ticket = UndoTicket {
            id: next_id(),
            expires_at: now + self.window,
        };
        let mut entries = self.entries.lock().await;
        Self::retain_active(&mut entries, now);
        entries.insert(
            ticket.id,
            Entry {
                action,
                expires_at: ticket.expires_at,
                state: UndoState::Active,
            },
        );
        ticket
    }

    /// State of a ticket, `None` when unknown
    pub async fn state(&self, ticket_id: u64) -> Option<UndoState> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get_mut(&ticket_id)?;
        if entry.state == UndoState::Active && Utc::now() >= entry.expires_at {
            entry.state = UndoState::Expired;
        }
        Some(entry.state)
    }

    /// Run the inverse action if the ticket is still active
    pub async fn undo(&self, ticket_id: u64) -> AppResult<Vec<Equipment>> {
        let action = {
            let mut entries = self.entries.lock().await;
            let entry = entries
                .get_mut(&ticket_id)
                .ok_or(AppError::UndoUnavailable(ticket_id))?;
            match entry.state {
                UndoState::Active if Utc::now() >= entry.expires_at => {
                    entry.state = UndoState::Expired;
                    return Err(AppError::UndoExpired(ticket_id));
                }
                UndoState::Active => {
                    entry.state = UndoState::Undone;
                    entry.action.clone()
                }
                UndoState::Expired => return Err(AppError::UndoExpired(ticket_id)),
                UndoState::Undone => return Err(AppError::UndoUnavailable(ticket_id)),
            }
        };

        let result = match action {
            CompensatingAction::RestoreEquipment(items) => self.restore_equipment(items).await,
        };
        if result.is_err() {
            // Nothing was restored, so the ticket can be retried
            if let Some(entry) = self.entries.lock().await.get_mut(&ticket_id) {
                entry.state = UndoState::Active;
            }
        }
        result
    }

    async fn restore_equipment(&self, items: Vec<Equipment>) -> AppResult<Vec<Equipment>> {
        let _guard = self.repository.lock().await;
        let mut equipment = self.repository.equipment_list().await;
        let restored: Vec<Equipment> = items
            .into_iter()
            .filter(|item| !equipment.iter().any(|e| e.id == item.id))
            .collect();
        equipment.extend(restored.iter().cloned());
        self.repository.equipment_save(&equipment).await?;

        tracing::info!("Restored {} equipment item(s)", restored.len());
        Ok(restored)
    }

    /// Drop settled and expired tickets
    pub async fn prune(&self) {
        Self::retain_active(&mut *self.entries.lock().await, Utc::now());
    }

    fn retain_active(entries: &mut HashMap<u64, Entry>, now: DateTime<Utc>) {
        entries.retain(|_, e| e.state == UndoState::Active && now < e.expires_at);
    }
}
