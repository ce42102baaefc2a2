//! Core types shared across the dropgate workspace: configuration,
//! error taxonomy, domain models, and upload validation.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

pub use config::{Config, StorageBackend};
pub use error::{AppError, LogLevel};
