//! Ports the core consumes from the presentation layer
//!
//! The core never renders anything. It reports outcomes through a
//! [`Notifier`] and asks a [`Confirmation`] before any destructive action.

use crate::services::undo::UndoTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Short transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
    /// Present when the outcome can be reverted through [`crate::app::CheckoutApp::undo`]
    pub undo: Option<UndoTicket>,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level,
            undo: None,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, message)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, message)
    }

    pub fn with_undo(mut self, ticket: UndoTicket) -> Self {
        self.undo = Some(ticket);
        self
    }
}

/// Sink for user-facing outcome messages
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Yes/no prompt shown before destructive operations
#[cfg_attr(test, mockall::automock)]
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always answers the same
pub struct FixedConfirmation(pub bool);

impl Confirmation for FixedConfirmation {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
