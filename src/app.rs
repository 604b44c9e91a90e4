//! Presentation-facing facade
//!
//! `CheckoutApp` is what a UI talks to. It owns no ambient state: the signed-in
//! user travels as an explicit [`Session`], and outcomes go to the injected
//! [`Notifier`]. Errors are both notified and returned.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult, ErrorKind},
    models::{
        equipment::{Equipment, EquipmentDraft, InventoryStats},
        log::Log,
        settings::{Category, Settings},
        user::{Registration, User},
    },
    ports::{Confirmation, Notification, Notifier},
    services::{undo::UndoTicket, Services},
};

/// Number of entries on the admin recent-activity panel
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Signed-in user handle
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn email(&self) -> &str {
        &self.user.email
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

#[derive(Clone)]
pub struct CheckoutApp {
    services: Services,
    notifier: Arc<dyn Notifier>,
    confirmation: Arc<dyn Confirmation>,
}

impl CheckoutApp {
    pub fn new(
        services: Services,
        notifier: Arc<dyn Notifier>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self {
            services,
            notifier,
            confirmation,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Run once at application start
    pub async fn start(&self) -> AppResult<()> {
        self.services.ensure_init().await
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// Notify a failure and hand the result back unchanged
    fn report<T>(&self, title: &str, result: AppResult<T>) -> AppResult<T> {
        if let Err(e) = &result {
            let title = match e.kind() {
                ErrorKind::Validation => "Validation Error",
                ErrorKind::Storage => "Storage Error",
                _ => title,
            };
            self.notify(Notification::error(title, e.to_string()));
        }
        result
    }

    // ---------------------------------------------------------------------
    // Identity
    // ---------------------------------------------------------------------

    pub async fn sign_up(&self, registration: Registration) -> AppResult<User> {
        let result = self.services.identity.register(registration).await;
        let user = self.report("Sign Up Failed", result)?;
        self.notify(Notification::success(
            "Account Created",
            "You can now log in with your new account.",
        ));
        Ok(user)
    }

    pub async fn log_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let result = self.services.identity.authenticate(email, password).await;
        let user = self.report("Login Failed", result)?;
        let greeting = if user.is_admin() { "Admin" } else { "Student" };
        self.notify(Notification::success(
            "Login Successful",
            format!("Welcome {}", greeting),
        ));
        Ok(Session { user })
    }

    pub fn log_out(&self, session: Session) {
        tracing::debug!("{} logged out", session.email());
        self.notify(Notification::info(
            "Logged Out",
            "You have been successfully logged out.",
        ));
    }

    pub fn current_user<'a>(&self, session: &'a Session) -> &'a User {
        &session.user
    }

    /// Gate for admin-only operations
    pub fn require_admin(&self, session: &Session) -> AppResult<()> {
        if session.is_admin() {
            return Ok(());
        }
        self.report(
            "Permission Denied",
            Err(AppError::Authorization(
                "Only admins can access this page.".to_string(),
            )),
        )
    }

    // ---------------------------------------------------------------------
    // Student ledger
    // ---------------------------------------------------------------------

    pub async fn equipment(&self) -> Vec<Equipment> {
        self.services.inventory.list().await
    }

    pub async fn is_already_borrowing(&self, session: &Session, equipment_id: u64) -> bool {
        self.services
            .ledger
            .is_already_borrowing(session.email(), equipment_id)
            .await
    }

    pub async fn borrow(
        &self,
        session: &Session,
        equipment_id: u64,
        quantity: u32,
        proof_photo: &str,
    ) -> AppResult<Log> {
        let result = self
            .services
            .ledger
            .borrow(session.email(), equipment_id, quantity, proof_photo)
            .await;
        let title = match &result {
            Err(AppError::AlreadyBorrowing { .. }) => "Already Borrowing",
            _ => "Borrow Failed",
        };
        let log = self.report(title, result)?;
        self.notify(Notification::success(
            "Success",
            format!("{} borrowed successfully.", log.name),
        ));
        Ok(log)
    }

    pub async fn return_item(
        &self,
        session: &Session,
        equipment_id: u64,
        return_photo: &str,
    ) -> AppResult<Log> {
        let result = self
            .services
            .ledger
            .return_equipment(session.email(), equipment_id, return_photo)
            .await;
        let log = self.report("Return Failed", result)?;
        self.notify(Notification::success(
            "Success",
            format!("{} returned successfully.", log.name),
        ));
        Ok(log)
    }

    /// The signed-in user's own history, newest first
    pub async fn my_history(&self, session: &Session) -> Vec<Log> {
        let mut logs = self.services.ledger.logs_for_user(session.email()).await;
        logs.reverse();
        logs
    }

    /// Inventory counters, shown on both dashboards
    pub async fn stats(&self) -> InventoryStats {
        self.services.inventory.stats().await
    }

    // ---------------------------------------------------------------------
    // Admin inventory
    // ---------------------------------------------------------------------

    pub async fn save_equipment(
        &self,
        session: &Session,
        draft: EquipmentDraft,
    ) -> AppResult<Equipment> {
        self.require_admin(session)?;
        let verb = if draft.id.is_some() { "updated" } else { "added" };
        let result = self.services.inventory.save(draft).await;
        let item = self.report("Save Failed", result)?;
        self.notify(Notification::success(
            "Success",
            format!("Equipment {}.", verb),
        ));
        Ok(item)
    }

    /// Delete one item after confirmation. `Ok(None)` when declined.
    pub async fn delete_equipment(
        &self,
        session: &Session,
        id: u64,
    ) -> AppResult<Option<UndoTicket>> {
        self.require_admin(session)?;
        if !self
            .confirmation
            .confirm("Are you sure you want to delete this item?")
        {
            return Ok(None);
        }
        let result = self.services.inventory.delete(id).await;
        let ticket = self.report("Delete Failed", result)?;
        self.notify(Notification::error("Deleted", "Item deleted.").with_undo(ticket));
        Ok(Some(ticket))
    }

    /// Delete several items after confirmation. `Ok(None)` when declined or empty.
    pub async fn bulk_delete_equipment(
        &self,
        session: &Session,
        ids: &[u64],
    ) -> AppResult<Option<UndoTicket>> {
        self.require_admin(session)?;
        if ids.is_empty()
            || !self
                .confirmation
                .confirm(&format!("Delete {} selected items?", ids.len()))
        {
            return Ok(None);
        }
        let result = self.services.inventory.bulk_delete(ids).await;
        let ticket = self.report("Delete Failed", result)?;
        self.notify(
            Notification::error("Bulk Deleted", format!("{} items deleted.", ids.len()))
                .with_undo(ticket),
        );
        Ok(Some(ticket))
    }

    /// Revert a deletion while its ticket is active
    pub async fn undo(&self, session: &Session, ticket_id: u64) -> AppResult<Vec<Equipment>> {
        self.require_admin(session)?;
        let result = self.services.undo.undo(ticket_id).await;
        let restored = self.report("Undo Failed", result)?;
        let message = if restored.len() == 1 {
            "Item has been restored.".to_string()
        } else {
            format!("{} items have been restored.", restored.len())
        };
        self.notify(Notification::success("Restored", message));
        Ok(restored)
    }

    pub async fn recent_activity(&self, session: &Session) -> AppResult<Vec<Log>> {
        self.require_admin(session)?;
        Ok(self
            .services
            .inventory
            .recent_activity(RECENT_ACTIVITY_LIMIT)
            .await)
    }

    pub async fn all_history(&self, session: &Session) -> AppResult<Vec<Log>> {
        self.require_admin(session)?;
        Ok(self.services.inventory.all_history().await)
    }

    // ---------------------------------------------------------------------
    // Admin settings
    // ---------------------------------------------------------------------

    pub async fn settings(&self) -> Settings {
        self.services.settings.get_settings().await
    }

    pub async fn update_settings(
        &self,
        session: &Session,
        settings: Settings,
    ) -> AppResult<Settings> {
        self.require_admin(session)?;
        let result = self.services.settings.update_settings(settings).await;
        self.report("Settings Not Saved", result)
    }

    pub async fn set_icon_logo(&self, session: &Session, icon: &str) -> AppResult<Settings> {
        self.require_admin(session)?;
        let result = self.services.settings.set_icon_logo(icon).await;
        let settings = self.report("Settings Not Saved", result)?;
        self.notify(Notification::success("Logo updated", "Icon logo has been set."));
        Ok(settings)
    }

    pub async fn set_image_logo(&self, session: &Session, data_url: &str) -> AppResult<Settings> {
        self.require_admin(session)?;
        let result = self.services.settings.set_image_logo(data_url).await;
        let settings = self.report("Settings Not Saved", result)?;
        self.notify(Notification::success("Logo updated", "Image logo has been set."));
        Ok(settings)
    }

    /// Colour pickers apply silently
    pub async fn set_colors(
        &self,
        session: &Session,
        bg_color: &str,
        text_color: &str,
    ) -> AppResult<Settings> {
        self.require_admin(session)?;
        let result = self.services.settings.set_colors(bg_color, text_color).await;
        self.report("Settings Not Saved", result)
    }

    pub async fn reset_colors(&self, session: &Session) -> AppResult<Settings> {
        self.require_admin(session)?;
        let result = self.services.settings.reset_colors().await;
        let settings = self.report("Settings Not Saved", result)?;
        self.notify(Notification::info(
            "Colors Reset",
            "Theme colors have been reset to default.",
        ));
        Ok(settings)
    }

    pub async fn add_category(
        &self,
        session: &Session,
        name: &str,
        default_image: Option<&str>,
    ) -> AppResult<Category> {
        self.require_admin(session)?;
        let result = self.services.settings.add_category(name, default_image).await;
        let category = self.report("Error", result)?;
        self.notify(Notification::success("Success", "New category added."));
        Ok(category)
    }

    /// Delete a category after confirmation. `Ok(None)` when declined.
    pub async fn delete_category(&self, session: &Session, id: u64) -> AppResult<Option<Category>> {
        self.require_admin(session)?;
        if self.services.settings.is_category_in_use(id).await {
            let name = self
                .services
                .settings
                .get_settings()
                .await
                .category(id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            return self.report("Cannot Delete", Err(AppError::CategoryInUse(name)));
        }
        if !self
            .confirmation
            .confirm("Are you sure you want to delete this category?")
        {
            return Ok(None);
        }
        let result = self.services.settings.delete_category(id).await;
        let category = self.report("Cannot Delete", result)?;
        self.notify(Notification::success("Success", "Category deleted."));
        Ok(Some(category))
    }
}
