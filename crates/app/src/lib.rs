//! `messmate-app`
//!
//! **Responsibility:** the session object a presentation layer owns.
//!
//! This crate provides:
//! - `MessManager`: roster mutations with autosave, confirmation gates, exports
//! - `AppConfig`: data directory, storage key and logging settings
//! - `bootstrap`: logging + SQLite store + loaded session in one call

pub mod config;
pub mod error;
pub mod session;

pub use config::{AppConfig, bootstrap};
pub use error::{AppError, AppResult};
pub use session::MessManager;
