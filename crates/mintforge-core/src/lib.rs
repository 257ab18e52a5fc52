//! Mintforge Core Library
//!
//! This crate provides the domain models, error types, configuration
//! abstraction, and constants shared across all mintforge components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{EnvSettings, MapSettings, SettingsSource};
pub use error::AppError;
