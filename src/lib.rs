//! SyllaTech Marketing Site Server
//!
//! A Rust implementation of the SyllaTech marketing site backend,
//! providing a REST JSON API for public form submissions, the booking
//! calendar, and the admin back-office (submissions, analytics, email).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduling;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
