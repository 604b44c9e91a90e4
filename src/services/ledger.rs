//! Lending ledger: borrow and return transitions over equipment and logs
//!
//! Per (email, equipment) pair there are two states, no active loan and on
//! loan. `borrow` moves from the first to the second, `return_equipment`
//! moves back. Both run under the repository lock.
//!
//! Neither transition is atomic across collections. `borrow` persists the
//! equipment counters before appending the log, `return_equipment` closes
//! the log before restoring the counters. Interruption between the two writes
//! leaves the ledger partially applied.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{log::Log, user::normalize_email},
    repository::{next_id, Repository},
};

#[derive(Clone)]
pub struct LedgerService {
    repository: Repository,
}

impl LedgerService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow `quantity` units of an equipment item
    pub async fn borrow(
        &self,
        email: &str,
        equipment_id: u64,
        quantity: u32,
        proof_photo: &str,
    ) -> AppResult<Log> {
        let email = normalize_email(email);
        if quantity < 1 {
            return Err(AppError::Validation("Quantity must be at least 1".to_string()));
        }
        if proof_photo.is_empty() {
            return Err(AppError::Validation("A proof photo is required".to_string()));
        }

        let _guard = self.repository.lock().await;

        let mut equipment = self.repository.equipment_list().await;
        let item = equipment
            .iter_mut()
            .find(|e| e.id == equipment_id)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", equipment_id)))?;

        let mut logs = self.repository.logs_list().await;
        if logs.iter().any(|l| l.is_open_for(&email, equipment_id)) {
            return Err(AppError::AlreadyBorrowing {
                email,
                equipment_id,
            });
        }
        if item.avail < quantity {
            return Err(AppError::InsufficientAvailability {
                equipment_id,
                requested: quantity,
                available: item.avail,
            });
        }

        item.avail -= quantity;
        let name = item.name.clone();
        self.repository.equipment_save(&equipment).await?;

        let log = Log {
            id: next_id(),
            email,
            equipment_id,
            name,
            quantity,
            borrow_at: Utc::now(),
            return_at: None,
            photo: proof_photo.to_string(),
            return_photo: None,
        };
        logs.push(log.clone());
        self.repository.logs_save(&logs).await?;

        tracing::info!(
            "{} borrowed {} x {} (equipment {})",
            log.email,
            log.quantity,
            log.name,
            log.equipment_id
        );
        Ok(log)
    }

    /// Whether `email` holds an open loan on `equipment_id`
    pub async fn is_already_borrowing(&self, email: &str, equipment_id: u64) -> bool {
        let email = normalize_email(email);
        self.repository
            .logs_find_open(&email, equipment_id)
            .await
            .is_some()
    }

    /// Close the open loan for the pair and put the units back on the shelf
    pub async fn return_equipment(
        &self,
        email: &str,
        equipment_id: u64,
        return_photo: &str,
    ) -> AppResult<Log> {
        let email = normalize_email(email);
        if return_photo.is_empty() {
            return Err(AppError::Validation("A return photo is required".to_string()));
        }

        let _guard = self.repository.lock().await;

        let mut logs = self.repository.logs_list().await;
        // First match in storage order wins if duplicates ever slipped in
        let log = logs
            .iter_mut()
            .find(|l| l.is_open_for(&email, equipment_id))
            .ok_or_else(|| AppError::NoActiveLoan {
                email: email.clone(),
                equipment_id,
            })?;
        log.return_at = Some(Utc::now());
        log.return_photo = Some(return_photo.to_string());
        let closed = log.clone();
        self.repository.logs_save(&logs).await?;

        let mut equipment = self.repository.equipment_list().await;
        let Some(item) = equipment.iter_mut().find(|e| e.id == equipment_id) else {
            tracing::warn!(
                "Loan {} closed but equipment {} no longer exists",
                closed.id,
                equipment_id
            );
            return Err(AppError::NotFound(format!(
                "Equipment {} not found",
                equipment_id
            )));
        };
        // Clamp: total may have been lowered while the units were out
        item.avail = item.avail.saturating_add(closed.quantity).min(item.total);
        self.repository.equipment_save(&equipment).await?;

        tracing::info!(
            "{} returned {} x {} (equipment {})",
            closed.email,
            closed.quantity,
            closed.name,
            closed.equipment_id
        );
        Ok(closed)
    }

    /// All logs of one user, in borrow order
    pub async fn logs_for_user(&self, email: &str) -> Vec<Log> {
        let email = normalize_email(email);
        self.repository
            .logs_list()
            .await
            .into_iter()
            .filter(|l| l.email == email)
            .collect()
    }

    /// Open loans of one user
    pub async fn active_loans_for_user(&self, email: &str) -> Vec<Log> {
        self.logs_for_user(email)
            .await
            .into_iter()
            .filter(Log::is_open)
            .collect()
    }

    /// Units of an equipment item held by open loans
    pub async fn open_quantity(&self, equipment_id: u64) -> u64 {
        self.repository
            .logs_list()
            .await
            .iter()
            .filter(|l| l.is_open() && l.equipment_id == equipment_id)
            .map(|l| l.quantity as u64)
            .sum()
    }
}
