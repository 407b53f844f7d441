//! MittiMobil Agricultural Equipment Rental Marketplace
//!
//! A peer-to-peer rental backend connecting farmers who own agricultural
//! equipment with farmers who need it, providing a REST JSON API for
//! equipment listings, proximity discovery and the booking lifecycle.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
