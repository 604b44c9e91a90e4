//! Loan log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One borrow record. Open while `return_at` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: u64,
    pub email: String,
    pub equipment_id: u64,
    /// Equipment name at borrow time
    pub name: String,
    pub quantity: u32,
    pub borrow_at: DateTime<Utc>,
    pub return_at: Option<DateTime<Utc>>,
    /// Borrow proof photo
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_photo: Option<String>,
}

impl Log {
    pub fn is_open(&self) -> bool {
        self.return_at.is_none()
    }

    /// Open loan held by `email` on `equipment_id`
    pub fn is_open_for(&self, email: &str, equipment_id: u64) -> bool {
        self.is_open() && self.email == email && self.equipment_id == equipment_id
    }
}
