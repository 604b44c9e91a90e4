//! Business logic services

pub mod identity;
pub mod inventory;
pub mod ledger;
pub mod settings;
pub mod undo;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub identity: identity::IdentityService,
    pub ledger: ledger::LedgerService,
    pub inventory: inventory::InventoryService,
    pub settings: settings::SettingsService,
    pub undo: undo::UndoRegistry,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let undo = undo::UndoRegistry::new(repository.clone(), config.undo.window_ms);
        Self {
            identity: identity::IdentityService::new(repository.clone(), config.auth.clone()),
            ledger: ledger::LedgerService::new(repository.clone()),
            inventory: inventory::InventoryService::new(repository.clone(), undo.clone()),
            settings: settings::SettingsService::new(repository.clone()),
            undo,
            repository,
        }
    }

    /// First-run initialisation: persist default settings if none exist and
    /// migrate legacy plaintext passwords. Safe to run on every start.
    pub async fn ensure_init(&self) -> AppResult<()> {
        if self.repository.settings_ensure_defaults().await? {
            tracing::info!("Wrote default settings");
        }
        self.identity.migrate_legacy_users().await?;
        Ok(())
    }
}
