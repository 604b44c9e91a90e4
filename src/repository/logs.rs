//! Loan log domain methods on Repository

use super::{Collection, Repository};
use crate::{error::AppResult, models::log::Log};

impl Repository {
    /// List all logs in storage (borrow) order
    pub async fn logs_list(&self) -> Vec<Log> {
        self.read_or(Collection::Logs, Vec::new()).await
    }

    /// Replace the logs document
    pub async fn logs_save(&self, logs: &[Log]) -> AppResult<()> {
        self.write(Collection::Logs, logs).await
    }

    /// First open log for the pair, in storage order
    pub async fn logs_find_open(&self, email: &str, equipment_id: u64) -> Option<Log> {
        self.logs_list()
            .await
            .into_iter()
            .find(|l| l.is_open_for(email, equipment_id))
    }
}
