//! Data models for Gearloan

pub mod equipment;
pub mod log;
pub mod settings;
pub mod user;

// Re-export commonly used types
pub use equipment::{Equipment, EquipmentDraft, InventoryStats};
pub use log::Log;
pub use settings::{Category, LogoMode, Settings};
pub use user::{Registration, Role, User};
