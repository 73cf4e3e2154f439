//! Core types for the launch search page.
//!
//! This crate contains shared data structures that are used across all crates:
//! - Launch summary and detail types returned by the launch API
//! - Configuration types and loading
//! - Error types

mod config;
mod error;
mod launch;

pub use config::{config_dir, config_path, load_config, ApiConfig, AppConfig, Messages};
pub use error::{ApiError, ConfigError};
pub use launch::{LaunchDetail, LaunchId, LaunchStatus, LaunchSummary, Mission};
