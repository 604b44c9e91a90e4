//! Gearloan - Sports Equipment Checkout Tracker
//!
//! Students borrow and return equipment against a lending ledger; admins
//! manage inventory, categories and branding. All state lives in a local
//! key-value store, one JSON document per collection.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod repository;
pub mod services;

pub use app::{CheckoutApp, Session};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
