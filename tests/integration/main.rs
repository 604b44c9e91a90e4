//! Integration tests exercising the public API end to end

mod common;
mod identity_tests;
mod inventory_tests;
mod ledger_tests;
mod settings_tests;
mod storage_tests;
